//! Algorithm Service Provider Interface
//!
//! Defines the contracts, data model and error type shared by every
//! window-based sequence regressor in the workspace:
//!
//! - [`Regressor`]: fits a model on a windowed [`Dataset`]
//! - [`WindowPredictor`]: a fitted model mapping one window to the next value
//! - [`Sample`] / [`Dataset`]: supervised (window, next-value) pairs
//! - [`TsError`]: Standardized error type for all algorithm operations
//! - [`Result`]: Convenient result type alias

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Regressor, WindowPredictor};
pub use error::{Result, TsError};
pub use model::{Dataset, Sample};

//! Contract traits for algorithm implementations
//!
//! - [`Regressor`]: trains a predictor from a windowed dataset
//! - [`WindowPredictor`]: maps one input window to a scalar estimate

mod predictor;

pub use predictor::{Regressor, WindowPredictor};

//! Algorithm Facade
//!
//! High-level API for per-request forecasting. Re-exports the public types of
//! the algorithm stack and adds the [`Forecaster`] pipeline that validates a
//! series, windows it, trains a fresh LSTM and forecasts recursively.
//!
//! # Example
//!
//! ```rust
//! use algorithm_facade::prelude::*;
//!
//! let series: Vec<f64> = (1..=10).map(|x| x as f64).collect();
//! let forecaster = Forecaster::new(ForecastConfig::new().with_epochs(5).with_seed(1)).unwrap();
//! let forecast = forecaster.forecast(&series, Some(2)).unwrap();
//! assert_eq!(forecast.values.len(), 2);
//! ```

pub mod pipeline;

// Re-export everything from core (includes implementations)
pub use algorithm_core::*;

// Consumer configuration
pub use algorithm_api::ForecastConfig;

pub use pipeline::{Forecast, Forecaster};

// Explicit re-exports for documentation
pub use algorithm_core::utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::pipeline::{Forecast, Forecaster};
    pub use algorithm_api::ForecastConfig;
    pub use algorithm_core::prelude::*;
}

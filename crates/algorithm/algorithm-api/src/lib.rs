//! Algorithm Consumer API
//!
//! Consumer-facing configuration for the forecasting pipeline, plus the SPI
//! types callers need alongside it.
//!
//! - [`ForecastConfig`]: window size, default horizon and model hyperparameters
//! - [`TsError`] / [`Result`]: error handling

pub mod config;

pub use config::ForecastConfig;

// Re-export the SPI types consumers handle directly
pub use algorithm_spi::{Dataset, Result, Sample, TsError};

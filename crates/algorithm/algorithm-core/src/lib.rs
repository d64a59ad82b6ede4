//! Algorithm Core Implementations
//!
//! Building blocks of the per-request forecasting pipeline:
//!
//! - [`window`]: turn a flat series into supervised (window, next-value) samples
//! - [`forecast`]: recursive multi-step forecasting over any [`WindowPredictor`]
//! - [`ml`]: the LSTM regressor (layers, optimizer, training loop)
//! - [`utils`]: metrics and preprocessing
//!
//! ## Example
//!
//! ```rust
//! use algorithm_core::prelude::*;
//!
//! let series: Vec<f64> = (1..=10).map(|x| x as f64).collect();
//! let dataset = prepare_dataset(&series, 3).unwrap();
//! assert_eq!(dataset.len(), 7);
//!
//! let regressor = LstmRegressor::new(LstmConfig::default().with_epochs(5).with_seed(7)).unwrap();
//! let predictor = regressor.fit(&dataset).unwrap();
//! let forecast = recursive_forecast(&predictor, last_window(&series, 3).unwrap(), 2).unwrap();
//! assert_eq!(forecast.len(), 2);
//! ```

pub mod forecast;
pub mod ml;
pub mod utils;
pub mod window;

// Re-export from SPI
pub use algorithm_spi::{Dataset, Regressor, Result, Sample, TsError, WindowPredictor};

// Re-export implementations for convenience
pub use forecast::recursive_forecast;
pub use ml::{LstmConfig, LstmPredictor, LstmRegressor, TrainingReport};
pub use window::{last_window, prepare_dataset};

/// Prelude module for convenient imports
pub mod prelude {
    pub use algorithm_spi::{Regressor, WindowPredictor};
    // Pipeline steps
    pub use crate::forecast::recursive_forecast;
    pub use crate::window::{last_window, prepare_dataset};
    // ML
    pub use crate::ml::{LstmConfig, LstmPredictor, LstmRegressor};
    // Data model and errors
    pub use algorithm_spi::{Dataset, Result, Sample, TsError};
}

//! Machine learning building blocks for sequence regression
//!
//! ## Components
//!
//! - **LSTM**: recurrent layer with backpropagation through time
//! - **Dense**: fully connected layer with ReLU or linear activation
//! - **Adam**: optimizer driving every parameter tensor
//! - **LstmRegressor**: the [`Regressor`](algorithm_spi::Regressor) tying them together

pub mod activation;
pub mod adam;
pub mod config;
pub mod dense;
pub mod lstm;
mod network;
pub mod regressor;

pub use config::LstmConfig;
pub use regressor::{LstmPredictor, LstmRegressor, TrainingReport};

//! LSTM regressor hyperparameters

use algorithm_spi::{Result, TsError};
use serde::{Deserialize, Serialize};

/// Hyperparameters of [`LstmRegressor`](super::LstmRegressor)
///
/// Defaults describe a small LSTM(32) → Dense(16, ReLU) → Dense(1) network
/// trained with Adam for 100 epochs in mini-batches of 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstmConfig {
    /// Hidden size of the LSTM layer
    pub lstm_units: usize,
    /// Width of the ReLU layer between the LSTM and the output
    pub dense_units: usize,
    /// Passes over the training set
    pub epochs: usize,
    /// Samples per gradient step
    pub batch_size: usize,
    /// Adam learning rate
    pub learning_rate: f64,
    /// Reshuffle sample order every epoch
    pub shuffle: bool,
    /// Seed for weight initialisation and shuffling; `None` draws from entropy
    pub seed: Option<u64>,
}

impl LstmConfig {
    pub fn with_units(mut self, lstm_units: usize, dense_units: usize) -> Self {
        self.lstm_units = lstm_units;
        self.dense_units = dense_units;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field is in range
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("lstm_units", self.lstm_units),
            ("dense_units", self.dense_units),
            ("epochs", self.epochs),
            ("batch_size", self.batch_size),
        ] {
            if value == 0 {
                return Err(TsError::invalid_parameter(name, "must be at least 1"));
            }
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(TsError::invalid_parameter(
                "learning_rate",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

impl Default for LstmConfig {
    fn default() -> Self {
        Self {
            lstm_units: 32,
            dense_units: 16,
            epochs: 100,
            batch_size: 4,
            learning_rate: 0.001,
            shuffle: true,
            seed: None,
        }
    }
}

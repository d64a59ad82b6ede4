//! Forecast pipeline configuration types.

use algorithm_spi::{Result, TsError};
use serde::{Deserialize, Serialize};

/// Configuration for one forecast request.
///
/// Defaults: window 3, horizon 3 (at most 1000), LSTM(32) → Dense(16),
/// 100 epochs, batch 4, learning rate 0.001, unseeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of past values fed to the model per prediction
    pub window: usize,
    /// Horizon used when the caller does not give one
    pub default_steps: usize,
    /// Largest horizon a caller may request
    pub max_steps: usize,
    /// Hidden size of the LSTM layer
    pub lstm_units: usize,
    /// Width of the ReLU layer
    pub dense_units: usize,
    /// Training epochs per request
    pub epochs: usize,
    /// Mini-batch size
    pub batch_size: usize,
    /// Adam learning rate
    pub learning_rate: f64,
    /// Seed for reproducible training; `None` trains from fresh randomness
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 3,
            default_steps: 3,
            max_steps: 1000,
            lstm_units: 32,
            dense_units: 16,
            epochs: 100,
            batch_size: 4,
            learning_rate: 0.001,
            seed: None,
        }
    }
}

impl ForecastConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the horizon used when a request omits `steps`.
    pub fn with_default_steps(mut self, steps: usize) -> Self {
        self.default_steps = steps;
        self
    }

    /// Set the largest accepted horizon.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the LSTM and dense layer sizes.
    pub fn with_units(mut self, lstm_units: usize, dense_units: usize) -> Self {
        self.lstm_units = lstm_units;
        self.dense_units = dense_units;
        self
    }

    /// Set the number of training epochs.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the mini-batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Fix the training seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Minimum series length that yields at least one training sample.
    pub fn min_series_len(&self) -> usize {
        self.window + 1
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("window", self.window),
            ("max_steps", self.max_steps),
            ("lstm_units", self.lstm_units),
            ("dense_units", self.dense_units),
            ("epochs", self.epochs),
            ("batch_size", self.batch_size),
        ] {
            if value == 0 {
                return Err(TsError::invalid_parameter(name, "must be at least 1"));
            }
        }
        if self.default_steps > self.max_steps {
            return Err(TsError::invalid_parameter(
                "default_steps",
                format!("must not exceed max_steps ({})", self.max_steps),
            ));
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

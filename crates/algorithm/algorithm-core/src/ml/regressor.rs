//! LSTM sequence-to-scalar regressor
//!
//! Fits a fresh [`Network`] per call: values are z-scored with statistics of
//! the training windows, the network is trained with Adam on mean squared
//! error, and the resulting [`LstmPredictor`] maps raw windows back to the
//! caller's scale.

use algorithm_spi::{Dataset, Regressor, Result, TsError, WindowPredictor};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::adam::Adam;
use super::config::LstmConfig;
use super::network::Network;
use crate::utils::metrics::{mse, rmse};
use crate::utils::preprocessing::{all_finite, Scaler};

/// Summary of one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Number of samples trained on
    pub samples: usize,
    /// Mean squared error per epoch, on the standardised scale
    pub loss_history: Vec<f64>,
    /// In-sample mean squared error after training, on the original scale
    pub final_loss: f64,
    /// Square root of `final_loss`, in the units of the series
    pub final_rmse: f64,
}

/// Trains an LSTM → Dense(ReLU) → Dense network on windowed samples
///
/// @algorithm LSTM
/// @category MachineLearning
/// @thread_safe true
///
/// # Example
///
/// ```rust
/// use algorithm_core::prelude::*;
///
/// let series: Vec<f64> = (0..30).map(|i| (i as f64 * 0.3).sin()).collect();
/// let dataset = prepare_dataset(&series, 3).unwrap();
///
/// let regressor = LstmRegressor::new(LstmConfig::default().with_epochs(10).with_seed(1)).unwrap();
/// let predictor = regressor.fit(&dataset).unwrap();
/// let next = predictor.predict(&series[series.len() - 3..]).unwrap();
/// assert!(next.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct LstmRegressor {
    config: LstmConfig,
}

impl LstmRegressor {
    /// Create a regressor, validating the configuration
    pub fn new(config: LstmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LstmConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for LstmRegressor {
    fn default() -> Self {
        Self {
            config: LstmConfig::default(),
        }
    }
}

impl Regressor for LstmRegressor {
    type Predictor = LstmPredictor;

    fn fit(&self, dataset: &Dataset) -> Result<LstmPredictor> {
        if dataset.is_empty() {
            return Err(TsError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if !dataset.values().all(f64::is_finite) {
            return Err(TsError::InvalidData(
                "training samples contain NaN or infinite values".to_string(),
            ));
        }

        let mut rng = self.rng();
        let scaler = Scaler::fit(dataset.values());
        let inputs: Vec<Vec<f64>> = dataset.iter().map(|s| scaler.scale_all(&s.input)).collect();
        let targets: Vec<f64> = dataset.targets().map(|t| scaler.scale(t)).collect();

        let mut network = Network::new(self.config.lstm_units, self.config.dense_units, &mut rng);
        let mut adam = Adam::new(self.config.learning_rate);
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        let mut loss_history = Vec::new();

        for epoch in 1..=self.config.epochs {
            if self.config.shuffle {
                order.shuffle(&mut rng);
            }

            let mut epoch_loss = 0.0;
            for batch in order.chunks(self.config.batch_size) {
                let mut grads = network.zero_grads();
                let scale = 2.0 / batch.len() as f64;

                for &idx in batch {
                    let (y, trace) = network.forward_traced(&inputs[idx]);
                    let err = y - targets[idx];
                    epoch_loss += err * err;
                    network.backward(&trace, scale * err, &mut grads);
                }

                network.apply_gradients(&mut adam, &grads);
            }
            epoch_loss /= dataset.len() as f64;

            if !epoch_loss.is_finite() {
                return Err(TsError::NumericalError(format!(
                    "training loss is not finite at epoch {}",
                    epoch
                )));
            }
            trace!(epoch, loss = epoch_loss, "epoch finished");
            loss_history.push(epoch_loss);
        }

        let fitted: Vec<f64> = inputs
            .iter()
            .map(|x| scaler.unscale(network.forward(x)))
            .collect();
        let actual: Vec<f64> = dataset.targets().collect();
        let final_loss = mse(&actual, &fitted);
        let final_rmse = rmse(&actual, &fitted);

        debug!(
            samples = dataset.len(),
            window = dataset.window(),
            epochs = self.config.epochs,
            final_loss,
            final_rmse,
            "lstm regressor fitted"
        );

        Ok(LstmPredictor {
            window: dataset.window(),
            network,
            scaler,
            report: TrainingReport {
                samples: dataset.len(),
                loss_history,
                final_loss,
                final_rmse,
            },
        })
    }
}

/// A trained LSTM, ready to predict the value after a window
#[derive(Debug, Clone)]
pub struct LstmPredictor {
    window: usize,
    network: Network,
    scaler: Scaler,
    report: TrainingReport,
}

impl LstmPredictor {
    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }
}

impl WindowPredictor for LstmPredictor {
    fn window_size(&self) -> usize {
        self.window
    }

    fn predict(&self, window: &[f64]) -> Result<f64> {
        if window.len() != self.window {
            return Err(TsError::invalid_parameter(
                "window",
                format!("expected {} values, got {}", self.window, window.len()),
            ));
        }
        if !all_finite(window) {
            return Err(TsError::InvalidData(
                "input window contains NaN or infinite values".to_string(),
            ));
        }

        let scaled = self.scaler.scale_all(window);
        let value = self.scaler.unscale(self.network.forward(&scaled));
        if !value.is_finite() {
            return Err(TsError::NumericalError(
                "prediction is not finite".to_string(),
            ));
        }
        Ok(value)
    }
}

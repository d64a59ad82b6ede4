//! Per-request forecasting pipeline
//!
//! validate → window → fit → recursive forecast. Nothing is cached between
//! calls: every [`Forecaster::forecast`] trains a new model.

use algorithm_api::ForecastConfig;
use algorithm_core::ml::LstmConfig;
use algorithm_core::utils::preprocessing::all_finite;
use algorithm_core::{last_window, prepare_dataset, recursive_forecast, LstmRegressor};
use algorithm_spi::{Regressor, Result, TsError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of one forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Predicted values, one per step
    pub values: Vec<f64>,
    /// Window size the model was trained with
    pub window: usize,
    /// Number of supervised samples the model saw
    pub training_samples: usize,
    /// In-sample mean squared error after training
    pub final_loss: f64,
    /// In-sample root mean squared error, in the units of the series
    pub final_rmse: f64,
}

/// Trains a fresh LSTM per call and forecasts recursively
#[derive(Debug, Clone)]
pub struct Forecaster {
    config: ForecastConfig,
    regressor: LstmRegressor,
}

impl Forecaster {
    /// Create a forecaster, validating the configuration up front
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        let regressor = LstmRegressor::new(lstm_config(&config))?;
        Ok(Self { config, regressor })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `steps` values after `series` (or the configured default
    /// horizon when `steps` is `None`)
    ///
    /// # Errors
    ///
    /// - [`TsError::InvalidParameter`] if `steps` exceeds the configured
    ///   `max_steps`
    /// - [`TsError::InvalidData`] if the series contains NaN or infinities
    /// - [`TsError::InsufficientData`] if the series has no more values than
    ///   the window, so no training sample can be built
    /// - [`TsError::NumericalError`] if training or prediction diverges
    pub fn forecast(&self, series: &[f64], steps: Option<usize>) -> Result<Forecast> {
        let steps = steps.unwrap_or(self.config.default_steps);
        let window = self.config.window;

        if steps > self.config.max_steps {
            return Err(TsError::invalid_parameter(
                "steps",
                format!("must be at most {}, got {}", self.config.max_steps, steps),
            ));
        }
        if !all_finite(series) {
            return Err(TsError::InvalidData(
                "series contains NaN or infinite values".to_string(),
            ));
        }
        if series.len() < self.config.min_series_len() {
            return Err(TsError::InsufficientData {
                required: self.config.min_series_len(),
                actual: series.len(),
            });
        }

        let dataset = prepare_dataset(series, window)?;
        debug!(
            series_len = series.len(),
            window,
            samples = dataset.len(),
            "dataset prepared"
        );

        let predictor = self.regressor.fit(&dataset)?;
        let values = recursive_forecast(&predictor, last_window(series, window)?, steps)?;
        let report = predictor.report();

        info!(
            series_len = series.len(),
            steps,
            samples = report.samples,
            final_loss = report.final_loss,
            "forecast complete"
        );

        Ok(Forecast {
            values,
            window,
            training_samples: report.samples,
            final_loss: report.final_loss,
            final_rmse: report.final_rmse,
        })
    }
}

fn lstm_config(config: &ForecastConfig) -> LstmConfig {
    let lstm = LstmConfig::default()
        .with_units(config.lstm_units, config.dense_units)
        .with_epochs(config.epochs)
        .with_batch_size(config.batch_size)
        .with_learning_rate(config.learning_rate);

    match config.seed {
        Some(seed) => lstm.with_seed(seed),
        None => lstm,
    }
}

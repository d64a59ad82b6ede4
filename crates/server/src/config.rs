//! Server configuration from the environment

use std::net::SocketAddr;

use algorithm_facade::ForecastConfig;
use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid HOST:PORT configuration '{0}'")]
    InvalidAddress(String),

    #[error("Invalid model configuration: {0}")]
    Model(#[from] algorithm_facade::TsError),
}

/// Everything the server needs to start
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub forecast: ForecastConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            forecast: ForecastConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and the `FORECAST_*` overrides from the process
    /// environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = parse(&lookup, "PORT", "port number")? {
            config.port = port;
        }

        let forecast = &mut config.forecast;
        if let Some(window) = parse(&lookup, "FORECAST_WINDOW", "window size")? {
            forecast.window = window;
        }
        if let Some(steps) = parse(&lookup, "FORECAST_DEFAULT_STEPS", "step count")? {
            forecast.default_steps = steps;
        }
        if let Some(max) = parse(&lookup, "FORECAST_MAX_STEPS", "step count")? {
            forecast.max_steps = max;
        }
        if let Some(epochs) = parse(&lookup, "FORECAST_EPOCHS", "epoch count")? {
            forecast.epochs = epochs;
        }
        if let Some(batch) = parse(&lookup, "FORECAST_BATCH_SIZE", "batch size")? {
            forecast.batch_size = batch;
        }
        if let Some(lr) = parse(&lookup, "FORECAST_LEARNING_RATE", "number")? {
            forecast.learning_rate = lr;
        }
        if let Some(seed) = parse(&lookup, "FORECAST_SEED", "unsigned integer")? {
            forecast.seed = Some(seed);
        }

        config.forecast.validate()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

fn parse<F, T>(lookup: &F, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name,
                expected,
                value,
            }),
    }
}

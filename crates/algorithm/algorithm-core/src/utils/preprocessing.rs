//! Data preprocessing utilities
//!
//! The LSTM regressor trains on z-scored values and maps its outputs back to
//! the caller's scale through a [`Scaler`].

use serde::{Deserialize, Serialize};

/// Z-score scaler fitted on a set of observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    mean: f64,
    std_dev: f64,
}

impl Scaler {
    /// Fit mean and standard deviation over `values`
    ///
    /// An empty input or a (near) constant input gets a unit standard
    /// deviation so that scaling stays finite.
    pub fn fit<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;

        // Welford
        for x in values {
            count += 1;
            let delta = x - mean;
            mean += delta / count as f64;
            m2 += delta * (x - mean);
        }

        if count == 0 {
            return Self::identity();
        }

        let std_dev = (m2 / count as f64).sqrt();
        Self {
            mean,
            std_dev: if std_dev < 1e-10 { 1.0 } else { std_dev },
        }
    }

    /// Scaler that leaves values unchanged
    pub fn identity() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn scale(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    pub fn unscale(&self, z: f64) -> f64 {
        z * self.std_dev + self.mean
    }

    pub fn scale_all(&self, data: &[f64]) -> Vec<f64> {
        data.iter().map(|&x| self.scale(x)).collect()
    }
}

/// Whether every value is finite (no NaN or infinity)
pub fn all_finite(data: &[f64]) -> bool {
    data.iter().all(|x| x.is_finite())
}

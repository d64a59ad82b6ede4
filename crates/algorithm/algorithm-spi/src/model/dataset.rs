//! Supervised window samples

use serde::{Deserialize, Serialize};

use crate::error::{Result, TsError};

/// One supervised example: an input window and the value that followed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Contiguous slice of the source series
    pub input: Vec<f64>,
    /// The element immediately after `input` in the source series
    pub target: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(input: Vec<f64>, target: f64) -> Self {
        Self { input, target }
    }
}

/// Ordered collection of [`Sample`]s that all share the same window size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    window: usize,
    samples: Vec<Sample>,
}

/// Unchecked wire form of [`Dataset`]
#[derive(Deserialize)]
struct RawDataset {
    window: usize,
    samples: Vec<Sample>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = TsError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        Dataset::new(raw.window, raw.samples)
    }
}

impl Dataset {
    /// Create a dataset, checking that every sample input has `window` values
    pub fn new(window: usize, samples: Vec<Sample>) -> Result<Self> {
        if let Some(bad) = samples.iter().find(|s| s.input.len() != window) {
            return Err(TsError::invalid_parameter(
                "window",
                format!(
                    "sample input has {} values, dataset window is {}",
                    bad.input.len(),
                    window
                ),
            ));
        }
        Ok(Self { window, samples })
    }

    /// Window size shared by every sample
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in source order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over samples in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Iterate over all targets in source order
    pub fn targets(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.target)
    }

    /// Iterate over every value appearing in inputs and targets
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples
            .iter()
            .flat_map(|s| s.input.iter().copied().chain(std::iter::once(s.target)))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

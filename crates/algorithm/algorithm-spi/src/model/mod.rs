//! Data model shared across the algorithm stack

mod dataset;

pub use dataset::{Dataset, Sample};

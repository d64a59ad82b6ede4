//! Utility functions shared by the algorithm implementations

pub mod metrics;
pub mod preprocessing;

pub use metrics::*;
pub use preprocessing::*;

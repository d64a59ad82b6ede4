//! Regressor and predictor traits
//!
//! A [`Regressor`] is the training half of a model: it consumes a windowed
//! [`Dataset`] and returns a fitted [`WindowPredictor`]. The predictor is
//! immutable once produced and only answers "what comes after this window".

use crate::error::Result;
use crate::model::Dataset;

/// A fitted model that maps a fixed-size input window to the next value
///
/// # Example
///
/// ```rust,ignore
/// use algorithm_spi::WindowPredictor;
///
/// fn next_after<P: WindowPredictor>(p: &P, series: &[f64]) -> algorithm_spi::Result<f64> {
///     p.predict(&series[series.len() - p.window_size()..])
/// }
/// ```
pub trait WindowPredictor {
    /// Number of values the predictor expects per input window
    fn window_size(&self) -> usize;

    /// Estimate the value that follows `window`
    ///
    /// Implementations reject windows whose length differs from
    /// [`window_size`](Self::window_size).
    fn predict(&self, window: &[f64]) -> Result<f64>;
}

impl<P: WindowPredictor + ?Sized> WindowPredictor for &P {
    fn window_size(&self) -> usize {
        (**self).window_size()
    }

    fn predict(&self, window: &[f64]) -> Result<f64> {
        (**self).predict(window)
    }
}

impl<P: WindowPredictor + ?Sized> WindowPredictor for Box<P> {
    fn window_size(&self) -> usize {
        (**self).window_size()
    }

    fn predict(&self, window: &[f64]) -> Result<f64> {
        (**self).predict(window)
    }
}

/// Trains a [`WindowPredictor`] from supervised window samples
///
/// Every call to [`fit`](Self::fit) trains from scratch; regressors hold
/// configuration only, never state from previous fits.
pub trait Regressor {
    /// The predictor type produced by a successful fit
    type Predictor: WindowPredictor;

    /// Fit a fresh model to `dataset`
    ///
    /// # Returns
    ///
    /// The fitted predictor, or an error if the dataset is empty, contains
    /// non-finite values, or training diverges.
    fn fit(&self, dataset: &Dataset) -> Result<Self::Predictor>;
}

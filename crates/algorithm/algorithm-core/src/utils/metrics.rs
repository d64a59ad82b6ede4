//! Forecast accuracy metrics
//!
//! All metrics return `NaN` when the inputs differ in length or are empty.

/// Mean Absolute Error (MAE)
///
/// # Example
///
/// ```rust
/// use algorithm_core::utils::metrics::mae;
///
/// let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let predicted = vec![1.1, 2.2, 2.9, 4.1, 5.0];
/// assert!((mae(&actual, &predicted) - 0.1).abs() < 1e-9);
/// ```
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    sum / actual.len() as f64
}

/// Mean Squared Error (MSE), the training loss of the LSTM regressor
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

//! Recursive multi-step forecasting
//!
//! Each step predicts one value from the current window, records it, then
//! slides the window by dropping its oldest value and appending the
//! prediction. Predictor errors end the loop and propagate unchanged.

use std::collections::VecDeque;

use algorithm_spi::{Result, TsError, WindowPredictor};

/// Forecast `horizon` values by feeding each prediction back as input
///
/// # Arguments
///
/// * `predictor` - A fitted model
/// * `initial_window` - The last `predictor.window_size()` observed values
/// * `horizon` - Number of future steps to produce
///
/// # Errors
///
/// Returns [`TsError::InvalidParameter`] if the initial window length does
/// not match the predictor, or whatever error the predictor raises.
pub fn recursive_forecast<P>(predictor: &P, initial_window: &[f64], horizon: usize) -> Result<Vec<f64>>
where
    P: WindowPredictor + ?Sized,
{
    let window_size = predictor.window_size();
    if initial_window.len() != window_size {
        return Err(TsError::invalid_parameter(
            "initial_window",
            format!(
                "expected {} values, got {}",
                window_size,
                initial_window.len()
            ),
        ));
    }

    let mut window: VecDeque<f64> = initial_window.iter().copied().collect();
    let mut predictions = Vec::new();

    for _ in 0..horizon {
        let next = predictor.predict(window.make_contiguous())?;
        predictions.push(next);

        window.pop_front();
        window.push_back(next);
    }

    Ok(predictions)
}

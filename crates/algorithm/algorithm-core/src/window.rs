//! Sliding-window dataset construction
//!
//! A series of length `n` with window `w` yields `n - w` samples with stride
//! one: sample `i` has input `series[i..i + w]` and target `series[i + w]`.
//! Order is preserved and nothing is shuffled. A series no longer than the
//! window produces an empty dataset; rejecting that case is up to the caller.

use algorithm_spi::{Dataset, Result, Sample, TsError};

/// Build the supervised dataset for `series` with the given window size
///
/// # Errors
///
/// Returns [`TsError::InvalidParameter`] if `window` is zero.
pub fn prepare_dataset(series: &[f64], window: usize) -> Result<Dataset> {
    if window == 0 {
        return Err(TsError::invalid_parameter("window", "must be at least 1"));
    }

    let samples = series
        .windows(window + 1)
        .map(|chunk| Sample::new(chunk[..window].to_vec(), chunk[window]))
        .collect();

    Dataset::new(window, samples)
}

/// The last `window` values of `series`, the seed window for forecasting
///
/// # Errors
///
/// Returns [`TsError::InsufficientData`] if the series is shorter than the
/// window, and [`TsError::InvalidParameter`] if `window` is zero.
pub fn last_window(series: &[f64], window: usize) -> Result<&[f64]> {
    if window == 0 {
        return Err(TsError::invalid_parameter("window", "must be at least 1"));
    }
    if series.len() < window {
        return Err(TsError::InsufficientData {
            required: window,
            actual: series.len(),
        });
    }
    Ok(&series[series.len() - window..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(|x| x as f64).collect()
    }

    #[test]
    fn test_prepare_dataset_one_to_ten() {
        let ds = prepare_dataset(&one_to_ten(), 3).unwrap();

        assert_eq!(ds.len(), 7);
        assert_eq!(ds.window(), 3);
        assert_eq!(ds.samples()[0], Sample::new(vec![1.0, 2.0, 3.0], 4.0));
        assert_eq!(ds.samples()[6], Sample::new(vec![7.0, 8.0, 9.0], 10.0));
    }

    #[test]
    fn test_series_equal_to_window_is_empty() {
        let ds = prepare_dataset(&[1.0, 2.0, 3.0], 3).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_series_shorter_than_window_is_empty() {
        let ds = prepare_dataset(&[1.0], 3).unwrap();
        assert!(ds.is_empty());

        let ds = prepare_dataset(&[], 3).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_one_more_than_window_gives_one_sample() {
        let ds = prepare_dataset(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.samples()[0].target, 4.0);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            prepare_dataset(&one_to_ten(), 0),
            Err(TsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_last_window() {
        let series = one_to_ten();
        assert_eq!(last_window(&series, 3).unwrap(), &[8.0, 9.0, 10.0]);
        assert_eq!(last_window(&series, 10).unwrap(), series.as_slice());
    }

    #[test]
    fn test_last_window_too_short() {
        assert_eq!(
            last_window(&[1.0, 2.0], 3).unwrap_err(),
            TsError::InsufficientData {
                required: 3,
                actual: 2
            }
        );
    }

    proptest! {
        #[test]
        fn prop_sample_count(series in prop::collection::vec(-1e6..1e6_f64, 0..64), window in 1usize..8) {
            let ds = prepare_dataset(&series, window).unwrap();
            prop_assert_eq!(ds.len(), series.len().saturating_sub(window));
        }

        #[test]
        fn prop_samples_are_contiguous(series in prop::collection::vec(-1e6..1e6_f64, 0..64), window in 1usize..8) {
            let ds = prepare_dataset(&series, window).unwrap();
            for (i, sample) in ds.iter().enumerate() {
                prop_assert_eq!(sample.input.as_slice(), &series[i..i + window]);
                prop_assert_eq!(sample.target, series[i + window]);
            }
        }
    }
}

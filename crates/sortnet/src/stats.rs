//! Order statistics read off a buffer sorted in place.

use crate::dispatch::DEFAULT_DISPATCHER;
use crate::error::SortError;

/// Median of `values`, sorting them in place.
///
/// Even counts average the two central elements. `None` when empty.
pub fn median(values: &mut [f64]) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }

    DEFAULT_DISPATCHER.sort_slice(values);
    let mid = count / 2;
    if count % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Nearest-rank quantile of `values` for `q` in `[0, 1]`, sorting in place.
pub fn quantile(values: &mut [f64], q: f64) -> Result<Option<f64>, SortError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(SortError::InvalidQuantile { q });
    }
    if values.is_empty() {
        return Ok(None);
    }

    DEFAULT_DISPATCHER.sort_slice(values);
    let rank = (q * values.len() as f64).ceil() as usize;
    Ok(Some(values[rank.clamp(1, values.len()) - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_windows() {
        let mut window = [5.0, 1.0, 9.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0];
        assert_eq!(median(&mut window), Some(5.0));

        let mut window = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(median(&mut window), Some(2.5));

        let mut empty: [f64; 0] = [];
        assert_eq!(median(&mut empty), None);
    }

    #[test]
    fn median_of_large_window() {
        let mut window: Vec<f64> = (0..125).rev().map(|i| i as f64 * 0.5).collect();
        assert_eq!(median(&mut window), Some(31.0));
    }

    #[test]
    fn quantile_nearest_rank() {
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.reverse();
        assert_eq!(quantile(&mut values, 0.0), Ok(Some(1.0)));
        assert_eq!(quantile(&mut values, 0.25), Ok(Some(3.0)));
        assert_eq!(quantile(&mut values, 0.5), Ok(Some(5.0)));
        assert_eq!(quantile(&mut values, 1.0), Ok(Some(10.0)));
        assert_eq!(quantile(&mut [], 0.5), Ok(None));
    }

    #[test]
    fn quantile_rejects_out_of_range() {
        let mut values = [1.0, 2.0];
        assert_eq!(
            quantile(&mut values, 1.5),
            Err(SortError::InvalidQuantile { q: 1.5 })
        );
        assert!(matches!(
            quantile(&mut values, f64::NAN),
            Err(SortError::InvalidQuantile { .. })
        ));
    }
}

// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `period` values
// and lands on index `period - 1`.
// =============================================================================

use crate::error::AnalysisError;
use crate::indicators::{align, check_window};

/// Compact EMA: one value per input starting at index `period - 1`.
///
/// Callers must have checked `period >= 1` and `values.len() >= period`.
pub(crate) fn ema_compact(values: &[f64], period: usize) -> Vec<f64> {
    let multiplier = 2.0 / (period + 1) as f64;

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        prev = value * multiplier + prev * (1.0 - multiplier);
        result.push(prev);
    }
    result
}

/// EMA series aligned with `values`.
///
/// # Errors
/// - `InvalidParameter` when `period` is zero.
/// - `InsufficientData` when `values.len() < period`.
pub fn calculate_ema(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window("EMA", period, period, values.len())?;
    Ok(align(values.len(), ema_compact(values, period)))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_err());
    }

    #[test]
    fn ema_period_zero() {
        assert!(matches!(
            calculate_ema(&[1.0, 2.0, 3.0], 0),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn ema_50_on_ten_closes_is_insufficient() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert!(matches!(
            calculate_ema(&closes, 50),
            Err(AnalysisError::InsufficientData { required: 50, actual: 10, .. })
        ));
    }

    #[test]
    fn ema_period_equals_length() {
        let ema = calculate_ema(&[2.0, 4.0, 6.0], 3).unwrap();
        assert_eq!(ema.len(), 3);
        assert_eq!(ema[..2], [None, None]);
        // Should be the SMA = (2+4+6)/3 = 4.0
        assert!((ema[2].unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of [1..=10]; SMA of first 5 = 3.0, multiplier = 1/3
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let ema = calculate_ema(&closes, 5).unwrap();
        assert_eq!(ema.len(), 10);
        assert!(ema[..4].iter().all(Option::is_none));

        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        assert!((ema[4].unwrap() - expected).abs() < 1e-10);
        for i in 5..10 {
            expected = closes[i] * mult + expected * (1.0 - mult);
            let got = ema[i].unwrap();
            assert!((got - expected).abs() < 1e-10, "got {got}, expected {expected}");
        }
    }

    #[test]
    fn ema_flat_input_is_flat() {
        let ema = calculate_ema(&[100.0; 60], 50).unwrap();
        assert!(ema[49..].iter().all(|v| (v.unwrap() - 100.0).abs() < 1e-10));
    }
}

// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA(period), upper/lower = middle ± k·σ, where σ is the
// population standard deviation over the same trailing window.

use serde::Serialize;

use crate::error::AnalysisError;
use crate::indicators::sma::calculate_sma;

/// One band triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBand {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger band series aligned with `closes`; first band at index
/// `period - 1`.
///
/// The middle band is the SMA series itself.
///
/// # Errors
/// - `InvalidParameter` when `period` is zero or `num_std` is negative or
///   non-finite.
/// - `InsufficientData` with fewer than `period` closes.
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Result<Vec<Option<BollingerBand>>, AnalysisError> {
    if !num_std.is_finite() || num_std < 0.0 {
        return Err(AnalysisError::invalid_parameter(
            "Bollinger",
            format!("std-dev multiplier must be finite and >= 0, got {num_std}"),
        ));
    }
    let middles = calculate_sma(closes, period).map_err(|e| match e {
        AnalysisError::InsufficientData { required, actual, .. } => {
            AnalysisError::insufficient("Bollinger", required, actual)
        }
        other => other,
    })?;

    let period_f = period as f64;
    let out = middles
        .iter()
        .enumerate()
        .map(|(i, middle)| {
            let middle = (*middle)?;
            let window = &closes[i + 1 - period..=i];
            let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period_f;
            let offset = num_std * variance.sqrt();
            Some(BollingerBand {
                upper: middle + offset,
                middle,
                lower: middle - offset,
            })
        })
        .collect();

    Ok(out)
}

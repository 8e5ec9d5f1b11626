// =============================================================================
// Volatility Classifier
// =============================================================================
//
// Compares the latest ATR with the mean of the most recent ATR values
// (latest included):
//
//   HIGH    — recent > historical * ratio
//   LOW     — recent < historical / ratio
//   MEDIUM  — otherwise (both boundaries exclusive)

use serde::Serialize;
use tracing::debug;

use crate::error::AnalysisError;
use crate::indicators::atr::calculate_atr;
use crate::market_data::Series;
use crate::types::VolatilityLevel;

/// Classification plus the two ATR figures it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityReading {
    pub level: VolatilityLevel,
    pub recent_atr: f64,
    pub historical_atr: f64,
}

/// Bucket `recent` against `historical`.
pub fn classify(recent: f64, historical: f64, ratio: f64) -> VolatilityLevel {
    if recent > historical * ratio {
        VolatilityLevel::High
    } else if recent < historical / ratio {
        VolatilityLevel::Low
    } else {
        VolatilityLevel::Medium
    }
}

/// Classify the volatility of `series` as of its last bar.
///
/// # Errors
/// - `InsufficientData` when the series has fewer than `atr_period + 1` bars
///   or no ATR value is defined.
/// - `InvalidParameter` for a zero period or history window, or a ratio that
///   is not a finite number above 1.
pub fn classify_volatility(
    series: &Series,
    atr_period: usize,
    history_window: usize,
    ratio: f64,
) -> Result<VolatilityReading, AnalysisError> {
    if history_window == 0 {
        return Err(AnalysisError::invalid_parameter(
            "atr_history_window",
            "must be >= 1",
        ));
    }
    if !ratio.is_finite() || ratio <= 1.0 {
        return Err(AnalysisError::invalid_parameter(
            "volatility_ratio",
            format!("must be a finite number above 1, got {ratio}"),
        ));
    }

    let atr: Vec<f64> = calculate_atr(series.bars(), atr_period)?
        .into_iter()
        .flatten()
        .collect();

    let recent = *atr
        .last()
        .ok_or_else(|| AnalysisError::insufficient("ATR", atr_period + 1, series.len()))?;

    let tail = &atr[atr.len().saturating_sub(history_window)..];
    let historical = tail.iter().sum::<f64>() / tail.len() as f64;

    let level = classify(recent, historical, ratio);
    debug!(
        symbol = series.symbol(),
        recent_atr = recent,
        historical_atr = historical,
        samples = tail.len(),
        level = %level,
        "volatility classified"
    );

    Ok(VolatilityReading {
        level,
        recent_atr: recent,
        historical_atr: historical,
    })
}

// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind an analysis
// summary. Every public function returns a series aligned with its input:
// output index `i` belongs to input index `i`, and positions before the
// look-back window is satisfied are `None`.
//
// A series too short for the requested window is an
// `AnalysisError::InsufficientData`; a zero period is an
// `AnalysisError::InvalidParameter`.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

use crate::error::AnalysisError;

/// Reject a zero period and inputs shorter than `required`.
pub(crate) fn check_window(
    indicator: &'static str,
    period: usize,
    required: usize,
    actual: usize,
) -> Result<(), AnalysisError> {
    if period == 0 {
        return Err(AnalysisError::invalid_parameter(indicator, "period must be >= 1"));
    }
    if actual < required {
        return Err(AnalysisError::insufficient(indicator, required, actual));
    }
    Ok(())
}

/// Left-pad a compact series (whose last value belongs to input index
/// `len - 1`) with `None` up to `len` entries.
pub(crate) fn align(len: usize, compact: Vec<f64>) -> Vec<Option<f64>> {
    let lead = len.saturating_sub(compact.len());
    let mut out = Vec::with_capacity(len);
    out.resize(lead, None);
    out.extend(compact.into_iter().map(Some));
    out
}

/// Last defined value of an aligned series.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.iter().rev().find_map(|v| *v)
}

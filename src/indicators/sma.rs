//! Simple moving average over a trailing window.

use crate::error::AnalysisError;
use crate::indicators::{align, check_window};

/// SMA series aligned with `values`; first value at index `period - 1`.
pub fn calculate_sma(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window("SMA", period, period, values.len())?;

    let compact = values
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect();
    Ok(align(values.len(), compact))
}

// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line  = EMA(fast) - EMA(slow)
//   Signal     = EMA(signal) of the MACD line, seeded with the SMA of its
//                first `signal` defined values
//   Histogram  = MACD line - Signal
//
// With the standard (12, 26, 9) the line starts at index 25 and the signal and
// histogram at index 33.
// =============================================================================

use serde::Serialize;

use crate::error::AnalysisError;
use crate::indicators::ema::ema_compact;
use crate::indicators::{align, check_window};

/// The three MACD trajectories, each aligned with the input closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Minimum number of closes for a MACD with a defined signal line.
pub fn required_len(slow: usize, signal: usize) -> usize {
    slow + signal.saturating_sub(1)
}

/// Compute MACD line, signal and histogram.
///
/// # Errors
/// - `InvalidParameter` when a period is zero or `fast >= slow`.
/// - `InsufficientData` with fewer than `slow + signal - 1` closes.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdSeries, AnalysisError> {
    if fast == 0 || signal == 0 {
        return Err(AnalysisError::invalid_parameter("MACD", "periods must be >= 1"));
    }
    if fast >= slow {
        return Err(AnalysisError::invalid_parameter(
            "MACD",
            format!("fast period {fast} must be shorter than slow period {slow}"),
        ));
    }
    check_window("MACD", slow, required_len(slow, signal), closes.len())?;

    let fast_ema = ema_compact(closes, fast);
    let slow_ema = ema_compact(closes, slow);

    // Both compact series end on the last close; drop the fast EMA's head so
    // they line up from index `slow - 1`.
    let skip = slow - fast;
    let line: Vec<f64> = fast_ema[skip..]
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema_compact(&line, signal);
    let histogram: Vec<f64> = line[signal - 1..]
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    let len = closes.len();
    Ok(MacdSeries {
        macd: align(len, line),
        signal: align(len, signal_line),
        histogram: align(len, histogram),
    })
}

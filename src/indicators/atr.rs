// =============================================================================
// Average True Range (ATR) — Wilder's Smoothing Method
// =============================================================================
//
// True Range (TR) for each bar after the first:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the smoothed average of TR using Wilder's method:
//   ATR_p   = SMA of TR_1 ..= TR_p
//   ATR_t   = (ATR_{t-1} * (period - 1) + TR_t) / period
//
// Bar 0 has no previous close, so the first ATR lands on bar index `period`.
// Default period: 14
// =============================================================================

use crate::error::AnalysisError;
use crate::indicators::{align, check_window};
use crate::market_data::Bar;

/// True range per bar. Index 0 is `None` (no previous close).
pub fn true_range(bars: &[Bar]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(bars.len());
    if bars.is_empty() {
        return out;
    }
    out.push(None);
    for w in bars.windows(2) {
        let (prev, bar) = (&w[0], &w[1]);
        let hl = bar.high() - bar.low();
        let hc = (bar.high() - prev.close()).abs();
        let lc = (bar.low() - prev.close()).abs();
        out.push(Some(hl.max(hc).max(lc)));
    }
    out
}

/// Full ATR series aligned with `bars`.
///
/// # Errors
/// - `InvalidParameter` when `period` is zero.
/// - `InsufficientData` with fewer than `period + 1` bars (we need `period`
///   TR values, each requiring a previous bar).
pub fn calculate_atr(bars: &[Bar], period: usize) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window("ATR", period, period + 1, bars.len())?;

    let tr: Vec<f64> = true_range(bars).into_iter().flatten().collect();

    let period_f = period as f64;
    let mut atr = tr[..period].iter().sum::<f64>() / period_f;
    let mut compact = Vec::with_capacity(tr.len() - period + 1);
    compact.push(atr);

    for &value in &tr[period..] {
        atr = (atr * (period_f - 1.0) + value) / period_f;
        compact.push(atr);
    }

    Ok(align(bars.len(), compact))
}

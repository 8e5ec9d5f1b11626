// =============================================================================
// Pattern Scanner
// =============================================================================
//
// Coarse two-bar comparison, applied to every bar except a reserved trailing
// window (20 bars by default):
//
//   bar i bullish AND bar i+1 bearish  => Hammer
//   bar i bearish AND bar i+1 bullish  => Engulfing
//   otherwise                          => Doji
//
// No body/wick ratios are checked. Output index k belongs to bar k.

use crate::market_data::Bar;
use crate::types::PatternLabel;

/// Label one bar against its successor.
pub fn label_pair(current: &Bar, next: &Bar) -> PatternLabel {
    if current.is_bullish() && next.is_bearish() {
        PatternLabel::Hammer
    } else if current.is_bearish() && next.is_bullish() {
        PatternLabel::Engulfing
    } else {
        PatternLabel::Doji
    }
}

/// Scan `bars[0 .. len - reserved_tail]`.
///
/// The reserved tail is clamped to at least 1 so the successor of the last
/// scanned bar always exists. Series not longer than the tail yield nothing.
pub fn scan_patterns(bars: &[Bar], reserved_tail: usize) -> Vec<PatternLabel> {
    let scanned = bars.len().saturating_sub(reserved_tail.max(1));
    bars.windows(2)
        .take(scanned)
        .map(|w| label_pair(&w[0], &w[1]))
        .collect()
}

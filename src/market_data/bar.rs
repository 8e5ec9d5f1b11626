use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar at {timestamp}: {reason}")]
    InvalidBar {
        timestamp: DateTime<Utc>,
        reason: &'static str,
    },

    /// Bar `index` does not come strictly after bar `index - 1`.
    #[error("bar {index} is not strictly after its predecessor")]
    Unordered { index: usize },
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

/// A single OHLCV observation. Fields are private so that every `Bar` in
/// existence satisfies the range invariants checked in [`Bar::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl Bar {
    /// Build a bar, rejecting non-finite values and inconsistent ranges.
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, SeriesError> {
        let invalid = |reason| SeriesError::InvalidBar { timestamp, reason };

        if ![open, high, low, close, volume].iter().all(|v| v.is_finite()) {
            return Err(invalid("non-finite value"));
        }
        if high < low {
            return Err(invalid("high below low"));
        }
        if high < open.max(close) {
            return Err(invalid("high below open/close"));
        }
        if low > open.min(close) {
            return Err(invalid("low above open/close"));
        }
        if volume < 0.0 {
            return Err(invalid("negative volume"));
        }

        Ok(Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    #[cfg(test)]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Close strictly above open.
    pub fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    /// Close strictly below open.
    pub fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Time-ordered bars for one symbol (oldest first, no duplicate timestamps).
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if let Some(index) = bars
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(SeriesError::Unordered { index: index + 1 });
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::close).collect()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.first().map(Bar::timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.last().map(Bar::timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn bar_accepts_consistent_range() {
        let bar = Bar::new(ts(1), 100.0, 105.0, 95.0, 102.0, 1_000.0).unwrap();
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert_eq!(bar.close(), 102.0);
    }

    #[test]
    fn bar_rejects_high_below_close() {
        let err = Bar::new(ts(1), 100.0, 101.0, 95.0, 102.0, 0.0).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidBar { reason: "high below open/close", .. }));
    }

    #[test]
    fn bar_rejects_low_above_open() {
        assert!(Bar::new(ts(1), 100.0, 105.0, 101.0, 102.0, 0.0).is_err());
    }

    #[test]
    fn bar_rejects_nan() {
        assert!(Bar::new(ts(1), f64::NAN, 105.0, 95.0, 100.0, 0.0).is_err());
    }

    #[test]
    fn bar_rejects_negative_volume() {
        assert!(Bar::new(ts(1), 100.0, 105.0, 95.0, 100.0, -1.0).is_err());
    }

    #[test]
    fn flat_bar_is_neither_bullish_nor_bearish() {
        let bar = Bar::new(ts(1), 100.0, 100.0, 100.0, 100.0, 0.0).unwrap();
        assert!(!bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn series_rejects_duplicate_timestamps() {
        let a = Bar::new(ts(1), 100.0, 105.0, 95.0, 100.0, 0.0).unwrap();
        let b = Bar::new(ts(2), 100.0, 105.0, 95.0, 100.0, 0.0).unwrap();
        let err = Series::new("X", vec![a, b, b]).unwrap_err();
        assert_eq!(err, SeriesError::Unordered { index: 2 });
    }

    #[test]
    fn series_exposes_closes_in_order() {
        let bars = (1..=3)
            .map(|d| Bar::new(ts(d), 10.0, 30.0, 1.0, d as f64 * 10.0 - 5.0, 1.0).unwrap())
            .collect();
        let series = Series::new("X", bars).unwrap();
        assert_eq!(series.closes(), vec![5.0, 15.0, 25.0]);
        assert_eq!(series.first_timestamp(), Some(ts(1)));
        assert_eq!(series.last_timestamp(), Some(ts(3)));
        assert_eq!(series.symbol(), "X");
    }

    #[test]
    fn empty_series_is_valid() {
        let series = Series::new("X", Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }
}

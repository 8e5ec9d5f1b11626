pub mod bar;

// Re-export for convenient access (e.g. `use crate::market_data::Series`).
pub use bar::{Bar, Series, SeriesError};

/// Series builders shared by the unit tests of the analysis modules.
#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{Duration, TimeZone, Utc};

    use super::{Bar, Series};

    /// One bar per day starting 2024-01-01, built from `(open, high, low, close)`.
    pub fn series_from_ohlc(ohlc: &[(f64, f64, f64, f64)]) -> Series {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bars = ohlc
            .iter()
            .enumerate()
            .map(|(i, &(o, h, l, c))| {
                Bar::new(start + Duration::days(i as i64), o, h, l, c, 1_000.0).unwrap()
            })
            .collect();
        Series::new("TEST", bars).unwrap()
    }

    /// `n` identical bars: open = close = 100, high = 105, low = 95.
    pub fn flat_series(n: usize) -> Series {
        series_from_ohlc(&vec![(100.0, 105.0, 95.0, 100.0); n])
    }

    /// Bars whose close walks through `closes`, each with a +/-1 wick and the
    /// previous close as open.
    pub fn series_from_closes(closes: &[f64]) -> Series {
        let ohlc: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let o = if i == 0 { c } else { closes[i - 1] };
                (o, o.max(c) + 1.0, o.min(c) - 1.0, c)
            })
            .collect();
        series_from_ohlc(&ohlc)
    }
}

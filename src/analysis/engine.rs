// =============================================================================
// Indicator Engine
// =============================================================================
//
// Computes RSI, the fast/slow EMA pair, Bollinger Bands and MACD over the
// closing prices. Each metric is independent: a metric whose window the series
// cannot fill is reported as `Metric::Unavailable` while the others are still
// computed. Misconfiguration (zero periods, inverted MACD) is not masked and
// fails the whole report.

use serde::Serialize;
use tracing::debug;

use crate::error::AnalysisError;
use crate::indicators::bollinger::{calculate_bollinger, BollingerBand};
use crate::indicators::ema::calculate_ema;
use crate::indicators::last_defined;
use crate::indicators::macd::{calculate_macd, MacdSeries};
use crate::indicators::rsi::calculate_rsi;
use crate::runtime_config::AnalysisParams;

// =============================================================================
// Metric
// =============================================================================

/// Marker for a metric the series is too short to compute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename = "unavailable")]
pub struct UnavailableMetric {
    pub indicator: &'static str,
    pub required: usize,
    pub actual: usize,
}

/// A computed value, or an explicit marker saying why there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric<T> {
    Available(T),
    Unavailable(UnavailableMetric),
}

impl<T> Metric<T> {
    /// Turn an `InsufficientData` failure into `Unavailable`; every other
    /// error is passed through.
    pub fn from_result(result: Result<T, AnalysisError>) -> Result<Self, AnalysisError> {
        match result {
            Ok(value) => Ok(Self::Available(value)),
            Err(AnalysisError::InsufficientData {
                indicator,
                required,
                actual,
            }) => Ok(Self::Unavailable(UnavailableMetric {
                indicator,
                required,
                actual,
            })),
            Err(e) => Err(e),
        }
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

// =============================================================================
// IndicatorReport
// =============================================================================

/// Indicator snapshot as of the last bar, plus the full MACD trajectories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReport {
    #[serde(rename = "RSI")]
    pub rsi: Metric<f64>,

    #[serde(rename = "EMA_20")]
    pub ema_fast: Metric<f64>,

    #[serde(rename = "EMA_50")]
    pub ema_slow: Metric<f64>,

    #[serde(rename = "Bollinger_Bands")]
    pub bollinger: Metric<BollingerBand>,

    #[serde(rename = "MACD")]
    pub macd: Metric<Vec<Option<f64>>>,

    #[serde(rename = "MACD_Signal")]
    pub macd_signal: Metric<Vec<Option<f64>>>,

    #[serde(rename = "MACD_Hist")]
    pub macd_hist: Metric<Vec<Option<f64>>>,
}

impl IndicatorReport {
    /// Number of metrics that could not be computed.
    pub fn unavailable_count(&self) -> usize {
        [
            self.rsi.is_available(),
            self.ema_fast.is_available(),
            self.ema_slow.is_available(),
            self.bollinger.is_available(),
            self.macd.is_available(),
            self.macd_signal.is_available(),
            self.macd_hist.is_available(),
        ]
        .iter()
        .filter(|ok| !**ok)
        .count()
    }
}

/// Last value of an aligned series, as a `Result` suitable for `Metric`.
fn last_value(
    series: Result<Vec<Option<f64>>, AnalysisError>,
    indicator: &'static str,
    required: usize,
) -> Result<f64, AnalysisError> {
    let series = series?;
    last_defined(&series).ok_or_else(|| AnalysisError::insufficient(indicator, required, series.len()))
}

/// Compute every indicator over `closes`.
pub fn compute_indicators(
    closes: &[f64],
    params: &AnalysisParams,
) -> Result<IndicatorReport, AnalysisError> {
    let rsi = Metric::from_result(last_value(
        calculate_rsi(closes, params.rsi_period),
        "RSI",
        params.rsi_period + 1,
    ))?;

    let ema_fast = Metric::from_result(last_value(
        calculate_ema(closes, params.ema_fast_period),
        "EMA",
        params.ema_fast_period,
    ))?;

    let ema_slow = Metric::from_result(last_value(
        calculate_ema(closes, params.ema_slow_period),
        "EMA",
        params.ema_slow_period,
    ))?;

    let bollinger = Metric::from_result(
        calculate_bollinger(closes, params.bollinger_period, params.bollinger_std_dev).and_then(
            |bands| {
                bands.last().copied().flatten().ok_or_else(|| {
                    AnalysisError::insufficient("Bollinger", params.bollinger_period, closes.len())
                })
            },
        ),
    )?;

    let macd = Metric::from_result(calculate_macd(
        closes,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    ))?;
    let (macd, macd_signal, macd_hist) = split_macd(macd);

    let report = IndicatorReport {
        rsi,
        ema_fast,
        ema_slow,
        bollinger,
        macd,
        macd_signal,
        macd_hist,
    };

    debug!(
        closes = closes.len(),
        unavailable = report.unavailable_count(),
        "indicators computed"
    );

    Ok(report)
}

type MacdMetrics = (
    Metric<Vec<Option<f64>>>,
    Metric<Vec<Option<f64>>>,
    Metric<Vec<Option<f64>>>,
);

fn split_macd(metric: Metric<MacdSeries>) -> MacdMetrics {
    match metric {
        Metric::Available(series) => (
            Metric::Available(series.macd),
            Metric::Available(series.signal),
            Metric::Available(series.histogram),
        ),
        Metric::Unavailable(marker) => (
            Metric::Unavailable(marker.clone()),
            Metric::Unavailable(marker.clone()),
            Metric::Unavailable(marker),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5 + (i as f64).sin()).collect()
    }

    #[test]
    fn long_series_has_every_metric() {
        let report = compute_indicators(&ramp(120), &AnalysisParams::default()).unwrap();
        assert_eq!(report.unavailable_count(), 0);

        let rsi = *report.rsi.available().unwrap();
        assert!((0.0..=100.0).contains(&rsi));

        let macd = report.macd.available().unwrap();
        assert_eq!(macd.len(), 120);
        assert_eq!(report.macd_hist.available().unwrap().len(), 120);
    }

    #[test]
    fn ten_closes_marks_everything_unavailable() {
        let report = compute_indicators(&ramp(10), &AnalysisParams::default()).unwrap();
        assert_eq!(report.unavailable_count(), 7);
        assert_eq!(
            report.rsi,
            Metric::Unavailable(UnavailableMetric {
                indicator: "RSI",
                required: 15,
                actual: 10,
            })
        );
        assert_eq!(
            report.ema_slow,
            Metric::Unavailable(UnavailableMetric {
                indicator: "EMA",
                required: 50,
                actual: 10,
            })
        );
    }

    #[test]
    fn medium_series_keeps_short_window_metrics() {
        // 30 closes: RSI, EMA_20, Bollinger ok; EMA_50 and MACD (34) not.
        let report = compute_indicators(&ramp(30), &AnalysisParams::default()).unwrap();
        assert!(report.rsi.is_available());
        assert!(report.ema_fast.is_available());
        assert!(report.bollinger.is_available());
        assert!(!report.ema_slow.is_available());
        assert!(!report.macd.is_available());
        assert!(!report.macd_signal.is_available());
        assert!(!report.macd_hist.is_available());
        assert_eq!(report.unavailable_count(), 4);
    }

    #[test]
    fn misconfiguration_is_not_masked() {
        let params = AnalysisParams {
            macd_fast: 30,
            ..AnalysisParams::default()
        };
        assert!(matches!(
            compute_indicators(&ramp(120), &params),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn unavailable_serialises_as_tagged_marker() {
        let metric: Metric<f64> = Metric::Unavailable(UnavailableMetric {
            indicator: "EMA",
            required: 50,
            actual: 10,
        });
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "unavailable",
                "indicator": "EMA",
                "required": 50,
                "actual": 10,
            })
        );
    }

    #[test]
    fn report_uses_wire_field_names() {
        let report = compute_indicators(&ramp(60), &AnalysisParams::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for key in ["RSI", "EMA_20", "EMA_50", "Bollinger_Bands", "MACD", "MACD_Signal", "MACD_Hist"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["RSI"].is_f64());
        assert!(json["Bollinger_Bands"]["upper"].is_f64());
        // Warm-up entries of the MACD arrays are null.
        assert!(json["MACD"][0].is_null());
        assert!(json["MACD"][59].is_f64());
    }
}

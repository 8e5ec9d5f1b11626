//! Summary assembly: folds the classifier, engine and scanner outputs into the
//! response value. No computation happens here.

use serde::Serialize;

use crate::analysis::engine::IndicatorReport;
use crate::analysis::volatility::VolatilityReading;
use crate::error::AnalysisError;
use crate::types::{PatternLabel, VolatilityLevel};

/// Terminal result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    #[serde(rename = "Volatility")]
    pub volatility: VolatilityLevel,

    #[serde(rename = "Indicators")]
    pub indicators: IndicatorReport,

    #[serde(rename = "Patterns")]
    pub patterns: Vec<PatternLabel>,
}

/// Combine the component outputs, propagating the first upstream failure.
pub fn assemble(
    volatility: Result<VolatilityReading, AnalysisError>,
    indicators: Result<IndicatorReport, AnalysisError>,
    patterns: Vec<PatternLabel>,
) -> Result<AnalysisSummary, AnalysisError> {
    Ok(AnalysisSummary {
        volatility: volatility?.level,
        indicators: indicators?,
        patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::compute_indicators;
    use crate::runtime_config::AnalysisParams;

    fn reading(level: VolatilityLevel) -> VolatilityReading {
        VolatilityReading {
            level,
            recent_atr: 1.0,
            historical_atr: 1.0,
        }
    }

    #[test]
    fn assemble_copies_inputs() {
        let closes: Vec<f64> = (0..60).map(|i| 10.0 + i as f64).collect();
        let report = compute_indicators(&closes, &AnalysisParams::default()).unwrap();
        let summary = assemble(
            Ok(reading(VolatilityLevel::Low)),
            Ok(report.clone()),
            vec![PatternLabel::Doji],
        )
        .unwrap();

        assert_eq!(summary.volatility, VolatilityLevel::Low);
        assert_eq!(summary.indicators, report);
        assert_eq!(summary.patterns, vec![PatternLabel::Doji]);
    }

    #[test]
    fn assemble_propagates_volatility_failure() {
        let closes = vec![1.0; 60];
        let report = compute_indicators(&closes, &AnalysisParams::default()).unwrap();
        let err = assemble(
            Err(AnalysisError::insufficient("ATR", 15, 3)),
            Ok(report),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { indicator: "ATR", .. }));
    }

    #[test]
    fn summary_uses_wire_field_names() {
        let closes = vec![1.0; 60];
        let report = compute_indicators(&closes, &AnalysisParams::default()).unwrap();
        let summary = assemble(
            Ok(reading(VolatilityLevel::High)),
            Ok(report),
            vec![PatternLabel::Hammer, PatternLabel::Engulfing],
        )
        .unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["Volatility"], "High");
        assert_eq!(json["Patterns"], serde_json::json!(["Hammer", "Engulfing"]));
        assert!(json["Indicators"].is_object());
    }
}

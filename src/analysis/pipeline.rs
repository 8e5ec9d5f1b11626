// =============================================================================
// AnalysisPipeline — one pass over one series
// =============================================================================
//
// Built per request from an explicit parameter set. The pipeline owns nothing
// but its parameters, so concurrent requests never share indicator state.

use tracing::info;

use crate::analysis::engine::compute_indicators;
use crate::analysis::patterns::scan_patterns;
use crate::analysis::summary::{assemble, AnalysisSummary};
use crate::analysis::volatility::classify_volatility;
use crate::error::AnalysisError;
use crate::market_data::Series;
use crate::runtime_config::AnalysisParams;

#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    params: AnalysisParams,
}

impl AnalysisPipeline {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    #[cfg(test)]
    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Classify volatility, compute indicators, scan patterns and assemble
    /// the summary. Read-only over `series`.
    pub fn run(&self, series: &Series) -> Result<AnalysisSummary, AnalysisError> {
        let p = &self.params;

        let volatility = classify_volatility(
            series,
            p.atr_period,
            p.atr_history_window,
            p.volatility_ratio,
        );
        let indicators = compute_indicators(&series.closes(), p);
        let patterns = scan_patterns(series.bars(), p.pattern_reserved_tail);

        let summary = assemble(volatility, indicators, patterns)?;

        info!(
            symbol = series.symbol(),
            bars = series.len(),
            from = ?series.first_timestamp(),
            to = ?series.last_timestamp(),
            volatility = %summary.volatility,
            rsi = ?summary.indicators.rsi.available(),
            patterns = summary.patterns.len(),
            unavailable = summary.indicators.unavailable_count(),
            "analysis complete"
        );

        Ok(summary)
    }
}

// =============================================================================
// Analysis Pipeline
// =============================================================================
//
// Read-only passes over one price series:
// - Volatility classifier (ATR now vs. its recent history)
// - Indicator engine (RSI, fast/slow EMA, Bollinger Bands, MACD)
// - Pattern scanner (coarse two-bar candle tags)
// and the assembler that folds their outputs into an `AnalysisSummary`.

pub mod engine;
pub mod patterns;
pub mod pipeline;
pub mod summary;
pub mod volatility;

pub use pipeline::AnalysisPipeline;
pub use summary::AnalysisSummary;

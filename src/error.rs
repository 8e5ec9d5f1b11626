// =============================================================================
// Error taxonomy
// =============================================================================
//
// `AnalysisError` is the only failure a pipeline run can surface. A metric
// that merely lacks history is not an error; the indicator engine reports it
// as `Metric::Unavailable` instead.

use thiserror::Error;

use crate::market_data::SeriesError;

/// Failures raised by the data provider. Propagated unchanged to the caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure, timeout or non-JSON body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The upstream API does not know the symbol.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// The request itself is not something the provider can serve.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response parsed but its shape was not what we expected.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Bars came back but do not form a valid series.
    #[error("invalid series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

/// Failures of a full analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The series is too short for the requested indicator or window.
    #[error("insufficient data for {indicator}: need {required} bars, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    /// A configured period or threshold makes the computation meaningless.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AnalysisError {
    pub fn insufficient(indicator: &'static str, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            indicator,
            required,
            actual,
        }
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_indicator() {
        let err = AnalysisError::insufficient("RSI", 15, 10);
        assert_eq!(
            err.to_string(),
            "insufficient data for RSI: need 15 bars, got 10"
        );
    }

    #[test]
    fn provider_error_is_transparent() {
        let err: AnalysisError = ProviderError::UnknownSymbol("NOPE".into()).into();
        assert_eq!(err.to_string(), "unknown symbol: NOPE");
    }
}

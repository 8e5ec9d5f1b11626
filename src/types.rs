// =============================================================================
// Shared classification types used across the analysis pipeline
// =============================================================================

use serde::{Deserialize, Serialize};

/// Current ATR relative to its recent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl Default for VolatilityLevel {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for VolatilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Coarse two-bar candle tag assigned by the pattern scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternLabel {
    /// Bullish bar followed by a bearish bar.
    Hammer,
    /// Bearish bar followed by a bullish bar.
    Engulfing,
    /// Anything else.
    Doji,
}

impl std::fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hammer => write!(f, "Hammer"),
            Self::Engulfing => write!(f, "Engulfing"),
            Self::Doji => write!(f, "Doji"),
        }
    }
}

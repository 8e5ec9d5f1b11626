// =============================================================================
// Runtime Configuration — service settings and analysis parameters
// =============================================================================
//
// Every field carries a serde default so that a partial (or missing) JSON file
// still yields a complete configuration. Environment variables override the
// file for the handful of settings that differ between deployments.
//
// =============================================================================

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_interval() -> String {
    "1d".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_atr_period() -> usize {
    14
}

fn default_atr_history_window() -> usize {
    100
}

fn default_volatility_ratio() -> f64 {
    1.5
}

fn default_rsi_period() -> usize {
    14
}

fn default_ema_fast_period() -> usize {
    20
}

fn default_ema_slow_period() -> usize {
    50
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_std_dev() -> f64 {
    2.0
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_pattern_reserved_tail() -> usize {
    20
}

// =============================================================================
// AnalysisParams
// =============================================================================

/// Periods and thresholds for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Wilder ATR period.
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    /// Number of most recent ATR values averaged into the historical baseline.
    #[serde(default = "default_atr_history_window")]
    pub atr_history_window: usize,

    /// Recent/historical ATR ratio beyond which volatility is High (and below
    /// whose inverse it is Low). Exclusive on both sides.
    #[serde(default = "default_volatility_ratio")]
    pub volatility_ratio: f64,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Reported as `EMA_20`.
    #[serde(default = "default_ema_fast_period")]
    pub ema_fast_period: usize,

    /// Reported as `EMA_50`.
    #[serde(default = "default_ema_slow_period")]
    pub ema_slow_period: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Band offset in population standard deviations.
    #[serde(default = "default_bollinger_std_dev")]
    pub bollinger_std_dev: f64,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    /// Trailing bars excluded from pattern scanning.
    #[serde(default = "default_pattern_reserved_tail")]
    pub pattern_reserved_tail: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            atr_period: default_atr_period(),
            atr_history_window: default_atr_history_window(),
            volatility_ratio: default_volatility_ratio(),
            rsi_period: default_rsi_period(),
            ema_fast_period: default_ema_fast_period(),
            ema_slow_period: default_ema_slow_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_std_dev: default_bollinger_std_dev(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            pattern_reserved_tail: default_pattern_reserved_tail(),
        }
    }
}

impl AnalysisParams {
    /// Reject parameter sets that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("atr_period", self.atr_period),
            ("atr_history_window", self.atr_history_window),
            ("rsi_period", self.rsi_period),
            ("ema_fast_period", self.ema_fast_period),
            ("ema_slow_period", self.ema_slow_period),
            ("bollinger_period", self.bollinger_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        for (name, value) in periods {
            ensure!(value >= 1, "{name} must be >= 1");
        }
        ensure!(
            self.volatility_ratio.is_finite() && self.volatility_ratio > 1.0,
            "volatility_ratio must be > 1.0, got {}",
            self.volatility_ratio
        );
        ensure!(
            self.bollinger_std_dev.is_finite() && self.bollinger_std_dev >= 0.0,
            "bollinger_std_dev must be >= 0, got {}",
            self.bollinger_std_dev
        );
        ensure!(
            self.macd_fast < self.macd_slow,
            "macd_fast ({}) must be shorter than macd_slow ({})",
            self.macd_fast,
            self.macd_slow
        );
        Ok(())
    }
}

// =============================================================================
// ProviderConfig
// =============================================================================

/// Where and how price series are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bar interval requested from the provider (e.g. "1d", "1h").
    #[serde(default = "default_interval")]
    pub interval: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            interval: default_interval(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Verbose logging (`debug` level) unless `RUST_LOG` says otherwise.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub analysis: AnalysisParams,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            debug: false,
            provider: ProviderConfig::default(),
            analysis: AnalysisParams::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            interval = %config.provider.interval,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `TA_BIND_ADDR` and `TA_DEBUG` overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("TA_BIND_ADDR").ok(),
            std::env::var("TA_DEBUG").ok(),
        );
    }

    fn apply_overrides(&mut self, bind_addr: Option<String>, debug: Option<String>) {
        if let Some(addr) = bind_addr.filter(|a| !a.trim().is_empty()) {
            self.bind_addr = addr.trim().to_string();
        }
        if let Some(flag) = debug {
            self.debug = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.provider.timeout_secs > 0, "provider.timeout_secs must be > 0");
        self.analysis.validate().context("invalid analysis parameters")
    }
}

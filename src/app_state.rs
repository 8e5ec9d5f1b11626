// =============================================================================
// Application State
// =============================================================================
//
// Shared across handlers via `Arc<AppState>`. Holds only immutable
// configuration, the provider client and request counters; no indicator or
// series data survives a request.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::AnalysisPipeline;
use crate::provider::SeriesProvider;
use crate::runtime_config::RuntimeConfig;

pub struct AppState {
    pub config: RuntimeConfig,
    pub provider: Arc<dyn SeriesProvider>,

    started_at: Instant,
    requests_served: AtomicU64,
    requests_failed: AtomicU64,
}

impl AppState {
    pub fn new(config: RuntimeConfig, provider: Arc<dyn SeriesProvider>) -> Self {
        Self {
            config,
            provider,
            started_at: Instant::now(),
            requests_served: AtomicU64::new(0),
            requests_failed: AtomicU64::new(0),
        }
    }

    /// Fresh pipeline for one request.
    pub fn pipeline(&self) -> AnalysisPipeline {
        AnalysisPipeline::new(self.config.analysis.clone())
    }

    pub fn record_success(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn requests_failed(&self) -> u64 {
        self.requests_failed.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::MemoryProvider;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let state = AppState::new(RuntimeConfig::default(), Arc::new(MemoryProvider::default()));
        assert_eq!(state.requests_served(), 0);
        state.record_success();
        state.record_success();
        state.record_failure();
        assert_eq!(state.requests_served(), 2);
        assert_eq!(state.requests_failed(), 1);
    }

    #[test]
    fn pipeline_uses_configured_params() {
        let mut config = RuntimeConfig::default();
        config.analysis.atr_period = 7;
        let state = AppState::new(config, Arc::new(MemoryProvider::default()));
        assert_eq!(state.pipeline().params().atr_period, 7);
    }
}

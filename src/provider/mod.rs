// =============================================================================
// Series Providers
// =============================================================================
//
// A provider turns `(ticker, period)` into a validated `Series`. The analysis
// core never performs I/O; everything network-bound lives behind this trait so
// the HTTP layer can hold any implementation as `Arc<dyn SeriesProvider>`.

pub mod lookback;
pub mod yahoo;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::market_data::Series;

pub use lookback::Lookback;
pub use yahoo::YahooChartClient;

#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Fetch bars for `ticker` covering `period`, oldest first.
    async fn fetch(&self, ticker: &str, period: Lookback) -> Result<Series, ProviderError>;
}

//! The market poller and history selector, side by side.
//!
//! The two controllers share nothing; the dashboard only builds them from one
//! configuration and ties the poller's timer to mount/teardown.

use crate::domain::history::{HistorySelector, HistoryTable, SeriesLookup};
use crate::domain::market::{Asset, MarketPoller, MarketQuery};
use crate::error::MonitorError;
use crate::network::{
    DEFAULT_API_URL, DEFAULT_CURRENCY, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT, MAX_PAGE_SIZE,
};
use crate::shared::Symbol;
use crate::source::DataSource;

#[cfg(feature = "http")]
use crate::error::FetchError;
#[cfg(feature = "http")]
use crate::http::MarketDataHttp;

use std::time::Duration;

/// Page heading.
pub const DASHBOARD_TITLE: &str = "Crypto Monitoring Tool";

pub struct Dashboard<M, H = HistoryTable> {
    market: MarketPoller<M>,
    history: HistorySelector<H>,
    poll_interval: Duration,
}

#[cfg(feature = "http")]
impl Dashboard<MarketDataHttp> {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }
}

impl<M, H> Dashboard<M, H> {
    pub fn title(&self) -> &'static str {
        DASHBOARD_TITLE
    }

    pub fn market(&self) -> &MarketPoller<M> {
        &self.market
    }

    pub fn history(&self) -> &HistorySelector<H> {
        &self.history
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Stop the market timer. Nothing fetched afterwards reaches the list.
    pub fn teardown(&self) {
        self.market.stop();
    }
}

impl<M, H> Dashboard<M, H>
where
    M: DataSource<Key = MarketQuery, Value = Vec<Asset>> + 'static,
{
    /// Start polling: one fetch now, then one per poll interval.
    pub fn mount(&self) -> Result<(), MonitorError> {
        self.market.start(self.poll_interval)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub struct DashboardBuilder {
    base_url: String,
    poll_interval: Duration,
    request_timeout: Duration,
    vs_currency: String,
    per_page: u32,
    page: u32,
    history: Option<HistoryTable>,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            vs_currency: DEFAULT_CURRENCY.to_string(),
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
            history: None,
        }
    }
}

impl DashboardBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn vs_currency(mut self, currency: &str) -> Self {
        self.vs_currency = currency.to_string();
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Replace the built-in history table.
    pub fn history(mut self, table: HistoryTable) -> Self {
        self.history = Some(table);
        self
    }

    /// Replace the built-in history table with one parsed from JSON.
    pub fn history_json(self, json: &str) -> Result<Self, MonitorError> {
        Ok(self.history(HistoryTable::from_json(json)?))
    }

    pub fn query(&self) -> MarketQuery {
        MarketQuery {
            vs_currency: self.vs_currency.clone(),
            per_page: self.per_page,
            page: self.page,
        }
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.poll_interval.is_zero() {
            return Err(MonitorError::Config("poll interval must be non-zero".into()));
        }
        if self.per_page == 0 || self.per_page > MAX_PAGE_SIZE {
            return Err(MonitorError::Config(format!(
                "per_page must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.per_page
            )));
        }
        if self.page == 0 {
            return Err(MonitorError::Config("page numbers start at 1".into()));
        }
        if self.vs_currency.trim().is_empty() {
            return Err(MonitorError::Config("vs_currency must not be empty".into()));
        }
        Ok(())
    }

    /// Build against the public provider.
    #[cfg(feature = "http")]
    pub fn build(self) -> Result<Dashboard<MarketDataHttp>, MonitorError> {
        if self.base_url.trim().is_empty() {
            return Err(MonitorError::Config("base_url must not be empty".into()));
        }
        let http =
            MarketDataHttp::new(&self.base_url, self.request_timeout).map_err(FetchError::from)?;
        self.build_with_source(http)
    }

    /// Build with a custom market source and the configured history table.
    pub fn build_with_source<M>(self, market: M) -> Result<Dashboard<M>, MonitorError>
    where
        M: DataSource<Key = MarketQuery, Value = Vec<Asset>> + 'static,
    {
        let table = self.history.clone().unwrap_or_else(HistoryTable::builtin);
        self.build_with_sources(market, table)
    }

    /// Build with custom market and history sources.
    pub fn build_with_sources<M, H>(
        self,
        market: M,
        history: H,
    ) -> Result<Dashboard<M, H>, MonitorError>
    where
        M: DataSource<Key = MarketQuery, Value = Vec<Asset>> + 'static,
        H: DataSource<Key = Symbol, Value = SeriesLookup> + 'static,
    {
        self.validate()?;
        let query = self.query();
        tracing::debug!(
            vs_currency = %query.vs_currency,
            per_page = query.per_page,
            page = query.page,
            "Building dashboard"
        );
        Ok(Dashboard {
            market: MarketPoller::new(market, query),
            history: HistorySelector::new(history),
            poll_interval: self.poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let builder = DashboardBuilder::default();
        builder.validate().unwrap();
        assert_eq!(builder.query(), MarketQuery::default());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = DashboardBuilder::default()
            .poll_interval(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));
    }

    #[test]
    fn test_rejects_page_size_out_of_range() {
        assert!(DashboardBuilder::default().per_page(0).validate().is_err());
        assert!(DashboardBuilder::default().per_page(251).validate().is_err());
        assert!(DashboardBuilder::default().per_page(250).validate().is_ok());
    }

    #[test]
    fn test_rejects_page_zero_and_blank_currency() {
        assert!(DashboardBuilder::default().page(0).validate().is_err());
        assert!(DashboardBuilder::default().vs_currency("  ").validate().is_err());
    }

    #[test]
    fn test_history_json_bad_input() {
        let err = DashboardBuilder::default().history_json("not json").unwrap_err();
        assert!(matches!(err, MonitorError::Serde(_)));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_build_http_dashboard() {
        let dashboard = Dashboard::builder()
            .poll_interval(Duration::from_secs(30))
            .build()
            .unwrap();
        assert_eq!(dashboard.title(), "Crypto Monitoring Tool");
        assert_eq!(dashboard.poll_interval(), Duration::from_secs(30));
        assert_eq!(dashboard.market().query().per_page, 50);
    }
}

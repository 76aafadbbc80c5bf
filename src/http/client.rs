//! Low-level HTTP client: `MarketDataHttp`.
//!
//! One method per provider endpoint. Returns wire types; conversion to domain
//! types happens in the domain `client` modules. There is no retry layer; a
//! failed request is retried by the poller's next tick.

use crate::domain::market::wire::{decode_markets, MarketResponse};
use crate::domain::market::MarketQuery;
use crate::error::HttpError;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;

/// Low-level HTTP client for the market-data REST API.
#[derive(Debug, Clone)]
pub struct MarketDataHttp {
    base_url: String,
    client: Client,
}

impl MarketDataHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Markets ──────────────────────────────────────────────────────────

    pub fn markets_url(&self, query: &MarketQuery) -> String {
        format!(
            "{}/coins/markets?vs_currency={}&per_page={}&page={}",
            self.base_url,
            urlencoding::encode(&query.vs_currency),
            query.per_page,
            query.page
        )
    }

    pub async fn get_markets(&self, query: &MarketQuery) -> Result<Vec<MarketResponse>, HttpError> {
        let body = self.get_text(&self.markets_url(query)).await?;
        Ok(decode_markets(&body)?)
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        tracing::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(body);
        }
        Err(HttpError::from_status(status.as_u16(), body))
    }
}

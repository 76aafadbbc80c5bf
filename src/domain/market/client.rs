//! Provider-backed market source.

use super::convert::assets_from_wire;
use super::{Asset, MarketQuery};
use crate::error::FetchError;
use crate::http::MarketDataHttp;
use crate::source::DataSource;
use async_trait::async_trait;

#[async_trait]
impl DataSource for MarketDataHttp {
    type Key = MarketQuery;
    type Value = Vec<Asset>;

    async fn load(&self, query: &MarketQuery) -> Result<Vec<Asset>, FetchError> {
        let records = self.get_markets(query).await?;
        assets_from_wire(records)
    }
}

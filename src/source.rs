//! The async data-source seam both controllers are built on.
//!
//! The market poller loads a ranked asset page from a `DataSource` keyed by
//! [`MarketQuery`](crate::domain::market::MarketQuery); the history selector
//! loads a series lookup keyed by [`Symbol`](crate::shared::Symbol). Tests
//! substitute scripted sources with simulated latency.

use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait DataSource: Send + Sync {
    type Key: Send + Sync;
    type Value: Send;

    /// Load the value for `key`. This is the only suspension point a
    /// controller has.
    async fn load(&self, key: &Self::Key) -> Result<Self::Value, FetchError>;
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    type Key = T::Key;
    type Value = T::Value;

    async fn load(&self, key: &Self::Key) -> Result<Self::Value, FetchError> {
        (**self).load(key).await
    }
}

//! Scripted data sources shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crypto_monitor::domain::history::{HistoryTable, SeriesLookup};
use crypto_monitor::domain::market::{Asset, MarketQuery};
use crypto_monitor::error::FetchError;
use crypto_monitor::shared::{AssetId, Symbol};
use crypto_monitor::source::DataSource;

pub fn asset(id: &str, price: i64) -> Asset {
    Asset {
        id: AssetId::from(id),
        name: id.to_uppercase(),
        current_price: Decimal::from(price),
        market_cap: Decimal::from(price) * Decimal::from(1_000_000),
        price_change_24h: Decimal::ZERO,
    }
}

pub fn page(ids: &[&str]) -> Vec<Asset> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| asset(id, (i as i64 + 1) * 100))
        .collect()
}

/// Market source that answers from a script, then repeats `fallback`.
///
/// Every call sleeps for `delay` (paused clock) and records how many calls
/// overlapped.
pub struct ScriptedMarket {
    delay: Duration,
    script: Mutex<VecDeque<Result<Vec<Asset>, String>>>,
    fallback: Vec<Asset>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedMarket {
    pub fn new(fallback: Vec<Asset>) -> Self {
        Self {
            delay: Duration::ZERO,
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn then(self, response: Result<Vec<Asset>, &str>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(response.map_err(str::to_string));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for ScriptedMarket {
    type Key = MarketQuery;
    type Value = Vec<Asset>;

    async fn load(&self, _query: &MarketQuery) -> Result<Vec<Asset>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(assets)) => Ok(assets),
            Some(Err(message)) => Err(FetchError::Source(message)),
            None => Ok(self.fallback.clone()),
        }
    }
}

/// History table with a per-symbol lookup latency.
pub struct SlowTable {
    table: HistoryTable,
    delays: HashMap<Symbol, Duration>,
}

impl SlowTable {
    pub fn new(delays: &[(&str, Duration)]) -> Self {
        Self {
            table: HistoryTable::builtin(),
            delays: delays
                .iter()
                .map(|(s, d)| (Symbol::from(*s), *d))
                .collect(),
        }
    }
}

#[async_trait]
impl DataSource for SlowTable {
    type Key = Symbol;
    type Value = SeriesLookup;

    async fn load(&self, symbol: &Symbol) -> Result<SeriesLookup, FetchError> {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        self.table.load(symbol).await
    }
}

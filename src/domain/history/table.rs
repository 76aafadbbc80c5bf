//! Static symbol → series table backing the history selector.

use super::{HistorySeries, PricePoint, SeriesLookup};
use crate::error::{FetchError, MonitorError};
use crate::shared::Symbol;
use crate::source::DataSource;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

const BTC_MONTHLY: [(&str, i64); 36] = [
    ("Jan 2021", 30000),
    ("Feb 2021", 35000),
    ("Mar 2021", 42000),
    ("Apr 2021", 48000),
    ("May 2021", 35000),
    ("Jun 2021", 30000),
    ("Jul 2021", 31000),
    ("Aug 2021", 47000),
    ("Sep 2021", 43000),
    ("Oct 2021", 61000),
    ("Nov 2021", 57000),
    ("Dec 2021", 46000),
    ("Jan 2022", 42000),
    ("Feb 2022", 38000),
    ("Mar 2022", 47000),
    ("Apr 2022", 39000),
    ("May 2022", 29000),
    ("Jun 2022", 20000),
    ("Jul 2022", 23000),
    ("Aug 2022", 25000),
    ("Sep 2022", 19000),
    ("Oct 2022", 21000),
    ("Nov 2022", 16000),
    ("Dec 2022", 16500),
    ("Jan 2023", 23000),
    ("Feb 2023", 24000),
    ("Mar 2023", 28000),
    ("Apr 2023", 29000),
    ("May 2023", 27000),
    ("Jun 2023", 30000),
    ("Jul 2023", 31000),
    ("Aug 2023", 29000),
    ("Sep 2023", 26000),
    ("Oct 2023", 34000),
    ("Nov 2023", 37000),
    ("Dec 2023", 41000),
];

const ETH_MONTHLY: [(&str, i64); 36] = [
    ("Jan 2021", 1000),
    ("Feb 2021", 1200),
    ("Mar 2021", 1500),
    ("Apr 2021", 2200),
    ("May 2021", 3000),
    ("Jun 2021", 2000),
    ("Jul 2021", 2200),
    ("Aug 2021", 3200),
    ("Sep 2021", 3000),
    ("Oct 2021", 4300),
    ("Nov 2021", 4700),
    ("Dec 2021", 3900),
    ("Jan 2022", 3200),
    ("Feb 2022", 2700),
    ("Mar 2022", 3400),
    ("Apr 2022", 2800),
    ("May 2022", 2000),
    ("Jun 2022", 1100),
    ("Jul 2022", 1600),
    ("Aug 2022", 1800),
    ("Sep 2022", 1300),
    ("Oct 2022", 1500),
    ("Nov 2022", 1100),
    ("Dec 2022", 1200),
    ("Jan 2023", 1600),
    ("Feb 2023", 1700),
    ("Mar 2023", 1800),
    ("Apr 2023", 1900),
    ("May 2023", 2100),
    ("Jun 2023", 2200),
    ("Jul 2023", 2400),
    ("Aug 2023", 2300),
    ("Sep 2023", 2000),
    ("Oct 2023", 2500),
    ("Nov 2023", 2600),
    ("Dec 2023", 2900),
];

lazy_static::lazy_static! {
    /// Monthly BTC and ETH closes, Jan 2021 through Dec 2023.
    static ref BUILTIN: HistoryTable = {
        let mut table = HistoryTable::new();
        table.insert(Symbol::from("BTC"), monthly(&BTC_MONTHLY));
        table.insert(Symbol::from("ETH"), monthly(&ETH_MONTHLY));
        table
    };
}

fn monthly(rows: &[(&str, i64)]) -> Vec<PricePoint> {
    rows.iter()
        .map(|(period, price)| PricePoint::new(*period, Decimal::from(*price)))
        .collect()
}

#[derive(Deserialize)]
struct PointRecord {
    period: String,
    price: f64,
}

/// Immutable symbol → series mapping. Cheap to clone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryTable {
    series: Arc<HashMap<Symbol, Vec<PricePoint>>>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the dashboard: 36 monthly points each for BTC
    /// and ETH.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parse `{"BTC":[{"period":"Jan 2021","price":30000}, ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self, MonitorError> {
        let raw: HashMap<Symbol, Vec<PointRecord>> = serde_json::from_str(json)?;
        let mut table = HistoryTable::new();
        for (symbol, records) in raw {
            let points = records
                .into_iter()
                .map(|r| {
                    let price = Decimal::try_from(r.price).map_err(|_| {
                        MonitorError::Config(format!(
                            "{symbol} {}: price {} is not a representable decimal",
                            r.period, r.price
                        ))
                    })?;
                    Ok(PricePoint::new(r.period, price))
                })
                .collect::<Result<Vec<_>, MonitorError>>()?;
            table.insert(symbol, points);
        }
        Ok(table)
    }

    /// Add or replace one symbol's series.
    pub fn insert(&mut self, symbol: Symbol, points: Vec<PricePoint>) {
        Arc::make_mut(&mut self.series).insert(symbol, points);
    }

    pub fn lookup(&self, symbol: &Symbol) -> SeriesLookup {
        match self.series.get(symbol) {
            Some(points) => SeriesLookup::Found(HistorySeries::new(symbol.clone(), points.clone())),
            None => SeriesLookup::Unsupported(symbol.clone()),
        }
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.series.contains_key(symbol)
    }

    /// Symbols with a series, sorted.
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<_> = self.series.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[async_trait]
impl DataSource for HistoryTable {
    type Key = Symbol;
    type Value = SeriesLookup;

    async fn load(&self, symbol: &Symbol) -> Result<SeriesLookup, FetchError> {
        Ok(self.lookup(symbol))
    }
}

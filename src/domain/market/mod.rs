//! Market domain: the ranked asset list and its poller.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod poller;
pub mod state;
pub mod wire;

use crate::network::{DEFAULT_CURRENCY, DEFAULT_PAGE_SIZE};
use crate::shared::{fmt, AssetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt as stdfmt;

pub use poller::{FetchOutcome, MarketPoller, PollerStatus};
pub use state::{AssetList, FailureNotice, FeedStatus, MarketState};

// ─── Asset ───────────────────────────────────────────────────────────────────

/// One ranked asset from the market listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub current_price: Decimal,
    pub market_cap: Decimal,
    /// Signed 24 h change, in percent.
    pub price_change_24h: Decimal,
}

impl Asset {
    pub fn display_price(&self) -> String {
        fmt::price(&self.current_price)
    }

    pub fn display_market_cap(&self) -> String {
        fmt::market_cap(&self.market_cap)
    }

    pub fn display_change(&self) -> String {
        fmt::percent_change(&self.price_change_24h)
    }

    /// Tooltip lines shown when hovering a list row.
    pub fn tooltip_lines(&self) -> [String; 2] {
        [
            format!("Market Cap: {}", self.display_market_cap()),
            format!("24h Change: {}", self.display_change()),
        ]
    }
}

// ─── MarketQuery ─────────────────────────────────────────────────────────────

/// Parameters of one market listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub vs_currency: String,
    pub per_page: u32,
    pub page: u32,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            vs_currency: DEFAULT_CURRENCY.to_string(),
            per_page: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingId,
    MissingName,
    MissingField(&'static str),
    InvalidNumber(&'static str, f64),
}

impl stdfmt::Display for ValidationError {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                write!(f, "Asset validation errors ({id}):")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
            ValidationError::MissingId => write!(f, "Missing id"),
            ValidationError::MissingName => write!(f, "Missing name"),
            ValidationError::MissingField(field) => write!(f, "Missing {field}"),
            ValidationError::InvalidNumber(field, value) => {
                write!(f, "{field} is not a representable decimal: {value}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

//! Shared newtypes and utilities used across the domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw strings the provider sends.

pub mod fmt;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Provider identifier for an asset (e.g. `"bitcoin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// Ticker symbol used to key historical series (e.g. `"BTC"`).
///
/// Lookups are exact: `"btc"` and `"BTC"` are different symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Symbol(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtypes_serialize_as_plain_strings() {
        assert_eq!(
            serde_json::to_string(&AssetId::from("bitcoin")).unwrap(),
            "\"bitcoin\""
        );
        let symbol: Symbol = serde_json::from_str("\"ETH\"").unwrap();
        assert_eq!(symbol, Symbol::from("ETH"));
    }

    #[test]
    fn test_symbol_lookup_is_case_sensitive() {
        assert_ne!(Symbol::from("btc"), Symbol::from("BTC"));
    }
}

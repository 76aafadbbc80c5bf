//! Wire types for the market listing (REST).

use serde::{Deserialize, Serialize};

/// Raw asset record from `GET /coins/markets`.
///
/// The provider sends many more fields; only the ones the dashboard shows are
/// kept. Numeric fields are optional here so that a `null` is reported as a
/// validation failure naming the field instead of an opaque decode error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

/// Decode a listing body. The whole page fails if any record is malformed.
pub fn decode_markets(body: &str) -> Result<Vec<MarketResponse>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r#"[{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://example.com/btc.png",
            "current_price": 43210.5,
            "market_cap": 845000000000,
            "market_cap_rank": 1,
            "price_change_percentage_24h": -1.25
        }]"#;
        let records = decode_markets(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "bitcoin");
        assert_eq!(records[0].symbol.as_deref(), Some("btc"));
        assert_eq!(records[0].current_price, Some(43210.5));
        assert_eq!(records[0].market_cap, Some(845000000000.0));
    }

    #[test]
    fn test_decode_null_numbers_become_none() {
        let body = r#"[{"id":"x","name":"X","current_price":1.0,"market_cap":null,"price_change_percentage_24h":null}]"#;
        let records = decode_markets(body).unwrap();
        assert_eq!(records[0].market_cap, None);
        assert_eq!(records[0].price_change_percentage_24h, None);
    }

    #[test]
    fn test_decode_rejects_missing_name() {
        let body = r#"[{"id":"x","current_price":1.0,"market_cap":2.0,"price_change_percentage_24h":0.5}]"#;
        assert!(decode_markets(body).is_err());
    }

    #[test]
    fn test_decode_rejects_non_array_body() {
        assert!(decode_markets(r#"{"status":{"error_code":429}}"#).is_err());
    }
}

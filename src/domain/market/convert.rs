//! Conversion: MarketResponse → Asset (TryFrom + validation).

use super::wire::MarketResponse;
use super::{Asset, ValidationError};
use crate::error::FetchError;
use rust_decimal::Decimal;

fn decimal_field(
    field: &'static str,
    value: Option<f64>,
    errors: &mut Vec<ValidationError>,
) -> Decimal {
    match value {
        None => {
            errors.push(ValidationError::MissingField(field));
            Decimal::ZERO
        }
        Some(raw) => Decimal::try_from(raw).unwrap_or_else(|_| {
            errors.push(ValidationError::InvalidNumber(field, raw));
            Decimal::ZERO
        }),
    }
}

impl TryFrom<MarketResponse> for Asset {
    type Error = ValidationError;

    fn try_from(source: MarketResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();

        if source.id.trim().is_empty() {
            errors.push(ValidationError::MissingId);
        }
        if source.name.trim().is_empty() {
            errors.push(ValidationError::MissingName);
        }

        let current_price = decimal_field("current_price", source.current_price, &mut errors);
        let market_cap = decimal_field("market_cap", source.market_cap, &mut errors);
        let price_change_24h = decimal_field(
            "price_change_percentage_24h",
            source.price_change_percentage_24h,
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(source.id, errors));
        }

        Ok(Asset {
            id: source.id.into(),
            name: source.name,
            current_price,
            market_cap,
            price_change_24h,
        })
    }
}

/// Convert a whole page, all-or-nothing. A single bad record fails the fetch
/// so a partial list is never applied.
pub(crate) fn assets_from_wire(records: Vec<MarketResponse>) -> Result<Vec<Asset>, FetchError> {
    records
        .into_iter()
        .map(|r| Asset::try_from(r).map_err(|e| FetchError::Validation(e.to_string())))
        .collect()
}

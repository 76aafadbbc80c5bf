//! Display formatting for prices, market caps and percentage changes.
//!
//! Renderers show these strings verbatim in the market list and its
//! tooltips, so every value is formatted in the quote currency (USD).

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;
use std::sync::OnceLock;

static TRILLION: OnceLock<Decimal> = OnceLock::new();
static BILLION: OnceLock<Decimal> = OnceLock::new();
static MILLION: OnceLock<Decimal> = OnceLock::new();
static THOUSAND: OnceLock<Decimal> = OnceLock::new();

fn get_trillion() -> &'static Decimal {
    TRILLION.get_or_init(|| Decimal::from(1_000_000_000_000u64))
}

fn get_billion() -> &'static Decimal {
    BILLION.get_or_init(|| Decimal::from(1_000_000_000u64))
}

fn get_million() -> &'static Decimal {
    MILLION.get_or_init(|| Decimal::from(1_000_000u64))
}

fn get_thousand() -> &'static Decimal {
    THOUSAND.get_or_init(|| Decimal::from(1_000u64))
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Insert `,` thousands separators into the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a unit price: `$43,210.55`, or up to 6 decimals below one dollar.
pub fn price(value: &Decimal) -> String {
    let abs = value.abs();
    let fine = round_half_up(abs, 6);
    // Anything that rounds up to a dollar takes the cents form.
    let body = if fine >= Decimal::ONE {
        format!("{:.2}", round_half_up(abs, 2))
    } else {
        fine.normalize().to_string()
    };
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&body))
}

/// Format a large amount with a K/M/B/T suffix: `$1.23T`.
pub fn market_cap(value: &Decimal) -> String {
    let abs = value.abs();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    let (scaled, suffix) = if abs >= *get_trillion() {
        (abs / get_trillion(), "T")
    } else if abs >= *get_billion() {
        (abs / get_billion(), "B")
    } else if abs >= *get_million() {
        (abs / get_million(), "M")
    } else if abs >= *get_thousand() {
        (abs / get_thousand(), "K")
    } else {
        (abs, "")
    };

    format!("{sign}${:.2}{suffix}", round_half_up(scaled, 2))
}

/// Format a signed percentage change: `+2.35%`, `-0.80%`.
pub fn percent_change(value: &Decimal) -> String {
    let rounded = round_half_up(*value, 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{:.2}%", rounded.abs())
    } else {
        format!("+{:.2}%", rounded.abs())
    }
}

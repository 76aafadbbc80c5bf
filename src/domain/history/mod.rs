//! History domain: symbol selection, static price series, theme and info tabs.

pub mod selector;
pub mod state;
pub mod table;

use crate::shared::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use selector::HistorySelector;
pub use state::{HistoryState, SeriesState, ViewState};
pub use table::HistoryTable;

/// Heading of the chart panel.
pub const CHART_TITLE: &str = "Historical Price Chart";

// ─── Theme ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> &'static ThemePalette {
        match self {
            Theme::Light => &LIGHT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }
}

/// Colors a renderer applies for one theme (CSS hex strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub text: &'static str,
    pub tab_background: &'static str,
    pub tab_background_hover: &'static str,
    pub chart_grid: &'static str,
}

pub const DARK_PALETTE: ThemePalette = ThemePalette {
    background: "#1f1f1f",
    text: "#e0e0e0",
    tab_background: "#333",
    tab_background_hover: "#444",
    chart_grid: "#444",
};

pub const LIGHT_PALETTE: ThemePalette = ThemePalette {
    background: "#f9f9f9",
    text: "#333",
    tab_background: "#ddd",
    tab_background_hover: "#ccc",
    chart_grid: "#ccc",
};

// ─── InfoTab ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoTab {
    About,
    Usage,
}

impl InfoTab {
    pub const ALL: [InfoTab; 2] = [InfoTab::About, InfoTab::Usage];

    pub fn title(self) -> &'static str {
        match self {
            InfoTab::About => "About",
            InfoTab::Usage => "Usage",
        }
    }

    /// Body text, one entry per paragraph.
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            InfoTab::About => &[
                "This is a cryptocurrency historical price chart application.",
                "It displays historical price data for selected cryptocurrencies.",
            ],
            InfoTab::Usage => &["Click on the buttons below to select a cryptocurrency:"],
        }
    }
}

// ─── Series ──────────────────────────────────────────────────────────────────

/// One labelled point of a historical series (e.g. `"Jan 2021"`, 30000).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub period: String,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(period: impl Into<String>, price: Decimal) -> Self {
        Self {
            period: period.into(),
            price,
        }
    }
}

/// A symbol's chronological price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
}

impl HistorySeries {
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Self {
        Self { symbol, points }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn point(&self, period: &str) -> Option<&PricePoint> {
        self.points.iter().find(|p| p.period == period)
    }

    /// Lowest and highest price, for axis scaling. `None` when empty.
    pub fn price_range(&self) -> Option<(Decimal, Decimal)> {
        let mut prices = self.points.iter().map(|p| p.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Legend text for the chart line.
pub fn legend_label(series: Option<&HistorySeries>) -> String {
    match series {
        Some(s) => format!("Price of {}", s.symbol),
        None => "Price of Market".to_string(),
    }
}

/// Result of looking a symbol up in a history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesLookup {
    Found(HistorySeries),
    /// The table has no entry for this symbol. Renders as an empty series.
    Unsupported(Symbol),
}

impl SeriesLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, SeriesLookup::Found(_))
    }

    pub fn into_series(self) -> HistorySeries {
        match self {
            SeriesLookup::Found(series) => series,
            SeriesLookup::Unsupported(symbol) => HistorySeries::empty(symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: &[i64]) -> HistorySeries {
        HistorySeries::new(
            Symbol::from("BTC"),
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(format!("P{i}"), Decimal::from(*p)))
                .collect(),
        )
    }

    #[test]
    fn test_theme_defaults_to_dark_and_toggles() {
        let theme = Theme::default();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(theme.toggled(), Theme::Light);
        assert_eq!(theme.toggled().toggled(), theme);
    }

    #[test]
    fn test_palettes() {
        assert_eq!(Theme::Dark.palette().background, "#1f1f1f");
        assert_eq!(Theme::Light.palette().chart_grid, "#ccc");
    }

    #[test]
    fn test_info_tab_content() {
        assert_eq!(CHART_TITLE, "Historical Price Chart");
        assert_eq!(InfoTab::ALL.map(InfoTab::title), ["About", "Usage"]);
        assert_eq!(InfoTab::About.lines().len(), 2);
        assert!(InfoTab::Usage.lines()[0].starts_with("Click on the buttons"));
    }

    #[test]
    fn test_price_range() {
        assert_eq!(
            series(&[300, 100, 500, 200]).price_range(),
            Some((Decimal::from(100), Decimal::from(500)))
        );
        assert_eq!(HistorySeries::empty(Symbol::from("X")).price_range(), None);
    }

    #[test]
    fn test_legend_label() {
        assert_eq!(legend_label(Some(&series(&[1]))), "Price of BTC");
        assert_eq!(legend_label(None), "Price of Market");
    }

    #[test]
    fn test_unsupported_lookup_is_empty_series() {
        let lookup = SeriesLookup::Unsupported(Symbol::from("DOGE"));
        assert!(!lookup.is_found());
        let series = lookup.into_series();
        assert_eq!(series.symbol.as_str(), "DOGE");
        assert!(series.is_empty());
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let tab: InfoTab = serde_json::from_str("\"usage\"").unwrap();
        assert_eq!(tab, InfoTab::Usage);
    }
}

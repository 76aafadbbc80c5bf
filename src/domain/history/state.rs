//! History selector state containers.

use super::{legend_label, HistorySeries, InfoTab, Theme};
use crate::shared::Symbol;

/// User-facing selections of the chart panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub symbol: Option<Symbol>,
    pub tab: Option<InfoTab>,
    pub theme: Theme,
}

impl ViewState {
    /// Whether the "Show All" affordance applies (a symbol is selected).
    pub fn can_clear_symbol(&self) -> bool {
        self.symbol.is_some()
    }
}

/// Resolution progress of the selected symbol's series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeriesState {
    #[default]
    Idle,
    Resolving(Symbol),
    Resolved(HistorySeries),
}

impl SeriesState {
    pub fn series(&self) -> Option<&HistorySeries> {
        match self {
            SeriesState::Resolved(series) => Some(series),
            _ => None,
        }
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self, SeriesState::Resolving(_))
    }
}

/// Everything the history selector owns, as seen by renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub view: ViewState,
    pub series: SeriesState,
    /// Bumped on every symbol selection; a resolution started under an older
    /// generation is dropped.
    pub(crate) generation: u64,
}

impl HistoryState {
    pub fn legend_label(&self) -> String {
        legend_label(self.series.series())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::PricePoint;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_view() {
        let view = ViewState::default();
        assert_eq!(view.theme, Theme::Dark);
        assert!(view.tab.is_none());
        assert!(!view.can_clear_symbol());
    }

    #[test]
    fn test_legend_follows_resolved_series() {
        let mut state = HistoryState::default();
        assert_eq!(state.legend_label(), "Price of Market");

        state.series = SeriesState::Resolving(Symbol::from("ETH"));
        assert!(state.series.is_resolving());
        assert_eq!(state.legend_label(), "Price of Market");

        state.series = SeriesState::Resolved(HistorySeries::new(
            Symbol::from("ETH"),
            vec![PricePoint::new("Jan 2021", Decimal::from(1000))],
        ));
        assert_eq!(state.legend_label(), "Price of ETH");
    }
}

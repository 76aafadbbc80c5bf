//! # crypto-monitor
//!
//! Core of a cryptocurrency dashboard: a polling list of live market data and
//! a symbol-selectable historical price chart with theme and info tabs.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Newtypes, formatting, errors, the `DataSource` seam, and the
//!    domain controllers (`MarketPoller`, `HistorySelector`), each owning its
//!    state in a `watch` channel
//! 2. **HTTP API**: `MarketDataHttp`, one method per provider endpoint
//! 3. **Dashboard**: builder + composition of both controllers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crypto_monitor::prelude::*;
//!
//! let dashboard = Dashboard::builder()
//!     .poll_interval(Duration::from_secs(60))
//!     .build()?;
//! dashboard.mount()?;
//!
//! let rows = dashboard.market().snapshot().list.visible().to_vec();
//! let series = dashboard.history().select_symbol(Some("BTC".into())).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Crate error types.
pub mod error;

/// Provider URL constants and defaults.
pub mod network;

/// The async `DataSource` trait both controllers load through.
pub mod source;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// Provider HTTP client.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Dashboard ───────────────────────────────────────────────────────

/// `Dashboard`, the primary entry point.
pub mod dashboard;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Symbol};

    // Domain types: market
    pub use crate::domain::market::{
        Asset, AssetList, FailureNotice, FeedStatus, FetchOutcome, MarketPoller, MarketQuery,
        MarketState, PollerStatus,
    };

    // Domain types: history
    pub use crate::domain::history::{
        HistorySelector, HistorySeries, HistoryState, HistoryTable, InfoTab, PricePoint,
        SeriesLookup, SeriesState, Theme, ThemePalette, ViewState,
    };

    // Errors
    pub use crate::error::{FetchError, HttpError, MonitorError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_POLL_INTERVAL};

    // Data source seam
    pub use crate::source::DataSource;

    // Dashboard
    pub use crate::dashboard::{Dashboard, DashboardBuilder};

    // HTTP client
    #[cfg(feature = "http")]
    pub use crate::http::MarketDataHttp;
}

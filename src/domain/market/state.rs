//! Market list state containers.

use super::Asset;
use crate::shared::AssetId;
use chrono::{DateTime, Utc};

/// Number of rows shown before any "show more".
pub const DEFAULT_VISIBLE: usize = 5;

/// Rows revealed per "show more".
pub const VISIBLE_STEP: usize = 5;

/// The ranked asset list plus the user's view over it.
///
/// `visible_count` never decreases and may exceed `len()`; readers clamp via
/// [`AssetList::visible`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssetList {
    assets: Vec<Asset>,
    visible_count: usize,
    selected: Option<Asset>,
}

impl Default for AssetList {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            visible_count: DEFAULT_VISIBLE,
            selected: None,
        }
    }
}

impl AssetList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all assets with a fresh page. Cursor and selection are kept.
    pub fn replace(&mut self, assets: Vec<Asset>) {
        self.assets = assets;
    }

    pub fn show_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(VISIBLE_STEP);
    }

    /// Select the asset with `id` from the current page. Returns `false` and
    /// leaves the selection untouched when no asset matches.
    pub fn select(&mut self, id: &AssetId) -> bool {
        match self.assets.iter().find(|a| &a.id == id) {
            Some(asset) => {
                self.selected = Some(asset.clone());
                true
            }
            None => false,
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Leading window exposed to rendering.
    pub fn visible(&self) -> &[Asset] {
        &self.assets[..self.visible_count.min(self.assets.len())]
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Whether a "show more" would reveal anything.
    pub fn has_more(&self) -> bool {
        self.visible_count < self.assets.len()
    }

    /// The last clicked asset, as it was when clicked.
    pub fn selected(&self) -> Option<&Asset> {
        self.selected.as_ref()
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Transient notice for the most recent failed fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureNotice {
    pub message: String,
    pub at: DateTime<Utc>,
    /// Failures since the last successful fetch, including this one.
    pub consecutive: u32,
}

/// Health of the market feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedStatus {
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<FailureNotice>,
}

impl FeedStatus {
    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.last_success = Some(at);
        self.last_failure = None;
    }

    pub fn record_failure(&mut self, message: String, at: DateTime<Utc>) {
        let consecutive = self
            .last_failure
            .as_ref()
            .map(|f| f.consecutive + 1)
            .unwrap_or(1);
        self.last_failure = Some(FailureNotice {
            message,
            at,
            consecutive,
        });
    }

    pub fn is_degraded(&self) -> bool {
        self.last_failure.is_some()
    }
}

/// Everything the market poller owns, as seen by renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketState {
    pub list: AssetList,
    pub feed: FeedStatus,
}

//! History selector: symbol → series resolution plus chart view state.
//!
//! Commands apply synchronously to a `watch` channel. `select_symbol` also
//! hands back the resolution future; the caller awaits or spawns it. When a
//! newer selection lands first, the older resolution is dropped on
//! completion.

use super::state::{HistoryState, SeriesState};
use super::{HistorySeries, InfoTab, SeriesLookup, Theme};
use crate::shared::Symbol;
use crate::source::DataSource;

use futures_util::stream::Stream;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

struct Inner<S> {
    source: S,
    state: watch::Sender<HistoryState>,
}

impl<S> Inner<S>
where
    S: DataSource<Key = Symbol, Value = SeriesLookup>,
{
    async fn resolve(&self, symbol: &Symbol) -> HistorySeries {
        match self.source.load(symbol).await {
            Ok(SeriesLookup::Found(series)) => series,
            Ok(SeriesLookup::Unsupported(symbol)) => {
                tracing::debug!("No history for {}, showing empty series", symbol);
                HistorySeries::empty(symbol)
            }
            Err(e) => {
                tracing::warn!("Error loading history for {}: {}", symbol, e);
                HistorySeries::empty(symbol.clone())
            }
        }
    }
}

/// One outstanding resolution. If it is dropped before settling while its
/// selection is still current, the series falls back to `Idle`.
struct PendingResolution<S> {
    inner: Arc<Inner<S>>,
    symbol: Symbol,
    generation: u64,
    settled: bool,
}

impl<S> PendingResolution<S>
where
    S: DataSource<Key = Symbol, Value = SeriesLookup>,
{
    async fn run(mut self) -> Option<HistorySeries> {
        let series = self.inner.resolve(&self.symbol).await;
        self.settled = true;

        let generation = self.generation;
        let mut applied = None;
        self.inner.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            applied = Some(series.clone());
            state.series = SeriesState::Resolved(series);
            true
        });

        if applied.is_none() {
            tracing::debug!(
                "Selection changed while resolving {}, dropping result",
                self.symbol
            );
        }
        applied
    }
}

impl<S> Drop for PendingResolution<S> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let generation = self.generation;
        let abandoned = self.inner.state.send_if_modified(|state| {
            if state.generation != generation || !state.series.is_resolving() {
                return false;
            }
            state.series = SeriesState::Idle;
            true
        });
        if abandoned {
            tracing::debug!("Resolution of {} abandoned, series left idle", self.symbol);
        }
    }
}

/// Chart panel controller. Cloning yields another handle to the same state.
pub struct HistorySelector<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for HistorySelector<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> HistorySelector<S> {
    /// Show `tab`, or hide the info panel with `None`. The symbol is kept.
    pub fn set_tab(&self, tab: Option<InfoTab>) {
        self.inner.state.send_if_modified(|state| {
            if state.view.tab == tab {
                return false;
            }
            state.view.tab = tab;
            true
        });
    }

    /// Flip between light and dark. Returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::default();
        self.inner.state.send_modify(|state| {
            state.view.theme = state.view.theme.toggled();
            theme = state.view.theme;
        });
        theme
    }

    pub fn snapshot(&self) -> HistoryState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HistoryState> {
        self.inner.state.subscribe()
    }
}

impl<S> HistorySelector<S>
where
    S: DataSource<Key = Symbol, Value = SeriesLookup> + 'static,
{
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(HistoryState::default());
        Self {
            inner: Arc::new(Inner { source, state }),
        }
    }

    /// Select `symbol` (or clear with `None`) and close the info tab.
    ///
    /// The view change is visible immediately. The returned future resolves
    /// the series and yields it if it was applied, or `None` when the
    /// selection was cleared or superseded in the meantime. Dropping the
    /// future before it completes leaves the symbol selected with an `Idle`
    /// series; selecting the symbol again resolves it.
    pub fn select_symbol(
        &self,
        symbol: Option<Symbol>,
    ) -> impl Future<Output = Option<HistorySeries>> + Send + 'static {
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.view.tab = None;
            state.view.symbol = symbol.clone();
            state.series = match &symbol {
                Some(s) => SeriesState::Resolving(s.clone()),
                None => SeriesState::Idle,
            };
        });

        let pending = symbol.map(|symbol| PendingResolution {
            inner: Arc::clone(&self.inner),
            symbol,
            generation,
            settled: false,
        });
        async move { pending?.run().await }
    }

    /// Look `symbol` up without touching the selection. Unknown symbols and
    /// source failures both yield an empty series.
    pub async fn resolve(&self, symbol: &Symbol) -> HistorySeries {
        self.inner.resolve(symbol).await
    }

    /// Stream of snapshots, one per state change.
    pub fn changes(&self) -> impl Stream<Item = HistoryState> + Send + 'static {
        futures_util::stream::unfold(self.inner.state.subscribe(), |mut rx| async move {
            rx.changed().await.ok()?;
            let snapshot = rx.borrow_and_update().clone();
            Some((snapshot, rx))
        })
    }
}

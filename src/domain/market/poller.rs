//! Market poller: timer-driven refresh of the ranked asset list.
//!
//! - Owns one background tokio task per started poller (the tick loop)
//! - At most one fetch in flight: overlapping ticks are dropped, overlapping
//!   manual fetches are skipped
//! - Failures are logged and recorded; the last good list stays visible
//! - After `stop()` no result is applied, even from a fetch already in flight
//! - State lives in a `watch` channel; renderers read snapshots or follow
//!   `changes()`

use super::state::MarketState;
use super::{Asset, MarketQuery};
use crate::error::{FetchError, MonitorError};
use crate::shared::AssetId;
use crate::source::DataSource;

use async_lock::Mutex as AsyncMutex;
use chrono::Utc;
use futures_util::stream::Stream;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PollerStatus {
    Idle = 0,
    Running = 1,
    /// Torn down. Terminal: a stopped poller never mutates state again.
    Stopped = 2,
}

impl From<u8> for PollerStatus {
    fn from(v: u8) -> Self {
        match v {
            1 => PollerStatus::Running,
            2 => PollerStatus::Stopped,
            _ => PollerStatus::Idle,
        }
    }
}

/// What happened to one fetch attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The list was replaced with `count` assets.
    Applied { count: usize },
    /// The provider failed; the previous list was kept.
    Failed(FetchError),
    /// Another fetch was already in flight; nothing was requested.
    Skipped,
    /// The poller was torn down; any result was dropped.
    Discarded,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

// ─── Shared state (poller handle + background task) ──────────────────────────

struct Shared<S> {
    source: S,
    query: MarketQuery,
    state: watch::Sender<MarketState>,
    status: AtomicU8,
    fetch_gate: AsyncMutex<()>,
}

impl<S> Shared<S> {
    fn status(&self) -> PollerStatus {
        PollerStatus::from(self.status.load(Ordering::SeqCst))
    }

    fn is_stopped(&self) -> bool {
        self.status() == PollerStatus::Stopped
    }

    /// Apply `modify` unless torn down. The status check runs under the
    /// channel's write lock, so nothing lands after `stop()` is observed.
    fn mutate<F>(&self, modify: F) -> bool
    where
        F: FnOnce(&mut MarketState) -> bool,
    {
        let status = &self.status;
        self.state.send_if_modified(|state| {
            if PollerStatus::from(status.load(Ordering::SeqCst)) == PollerStatus::Stopped {
                return false;
            }
            modify(state)
        })
    }
}

impl<S> Shared<S>
where
    S: DataSource<Key = MarketQuery, Value = Vec<Asset>>,
{
    async fn fetch(&self) -> FetchOutcome {
        if self.is_stopped() {
            return FetchOutcome::Discarded;
        }

        let Some(_in_flight) = self.fetch_gate.try_lock() else {
            tracing::debug!("Market fetch already in flight, skipping");
            return FetchOutcome::Skipped;
        };

        let result = self.source.load(&self.query).await;

        let mut outcome = FetchOutcome::Discarded;
        self.mutate(|state| {
            match result {
                Ok(assets) => {
                    let count = assets.len();
                    state.list.replace(assets);
                    state.feed.record_success(Utc::now());
                    outcome = FetchOutcome::Applied { count };
                }
                Err(e) => {
                    tracing::error!("Error fetching market data: {}", e);
                    state.feed.record_failure(e.to_string(), Utc::now());
                    outcome = FetchOutcome::Failed(e);
                }
            }
            true
        });

        if matches!(outcome, FetchOutcome::Discarded) {
            tracing::debug!("Market poller torn down, discarding fetch result");
        }
        outcome
    }
}

// ─── Public MarketPoller ─────────────────────────────────────────────────────

/// Periodically refreshed ranked asset list with the user's view over it.
///
/// The poller owns its timer task; dropping the poller tears it down.
pub struct MarketPoller<S> {
    shared: Arc<Shared<S>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S> MarketPoller<S> {
    /// Current lifecycle status.
    pub fn status(&self) -> PollerStatus {
        self.shared.status()
    }

    pub fn is_running(&self) -> bool {
        self.status() == PollerStatus::Running
    }

    /// Tear down: cancel the timer task and refuse every later mutation.
    ///
    /// Safe to call more than once, and from any thread while `start` runs.
    pub fn stop(&self) {
        // Status and task change together under the task lock.
        let mut task = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = PollerStatus::from(
            self.shared
                .status
                .swap(PollerStatus::Stopped as u8, Ordering::SeqCst),
        );
        if let Some(handle) = task.take() {
            handle.abort();
        }
        drop(task);

        if previous != PollerStatus::Stopped {
            tracing::info!("Market poller stopped");
        }
    }

    /// Reveal the next page of rows. Returns the new cursor.
    pub fn show_more(&self) -> usize {
        self.shared.mutate(|state| {
            state.list.show_more();
            true
        });
        self.shared.state.borrow().list.visible_count()
    }

    /// Select an asset from the current list. Returns `false` if no asset
    /// matches (selection unchanged) or the poller is torn down.
    pub fn select(&self, id: &AssetId) -> bool {
        let mut found = false;
        self.shared.mutate(|state| {
            found = state.list.select(id);
            found
        });
        found
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> MarketState {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<MarketState> {
        self.shared.state.subscribe()
    }

    pub fn query(&self) -> &MarketQuery {
        &self.shared.query
    }
}

impl<S> MarketPoller<S>
where
    S: DataSource<Key = MarketQuery, Value = Vec<Asset>> + 'static,
{
    pub fn new(source: S, query: MarketQuery) -> Self {
        let (state, _) = watch::channel(MarketState::default());
        Self {
            shared: Arc::new(Shared {
                source,
                query,
                state,
                status: AtomicU8::new(PollerStatus::Idle as u8),
                fetch_gate: AsyncMutex::new(()),
            }),
            task: Mutex::new(None),
        }
    }

    /// Fetch immediately, then every `tick`.
    ///
    /// Calling `start` on a running poller is a no-op. A stopped poller
    /// cannot be restarted. Must be called from within a tokio runtime.
    pub fn start(&self, tick: Duration) -> Result<(), MonitorError> {
        if tick.is_zero() {
            return Err(MonitorError::Config("poll interval must be non-zero".into()));
        }

        let mut task = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Err(current) = self.shared.status.compare_exchange(
            PollerStatus::Idle as u8,
            PollerStatus::Running as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            return match PollerStatus::from(current) {
                PollerStatus::Stopped => Err(MonitorError::TornDown),
                _ => Ok(()),
            };
        }

        *task = Some(tokio::spawn(run_poll_loop(Arc::clone(&self.shared), tick)));

        tracing::info!(
            interval_ms = tick.as_millis() as u64,
            per_page = self.shared.query.per_page,
            "Market poller started"
        );
        Ok(())
    }

    /// Run one fetch now, outside the schedule.
    pub async fn fetch(&self) -> FetchOutcome {
        self.shared.fetch().await
    }

    /// Stream of snapshots, one per state change. Ends when the poller is
    /// dropped.
    pub fn changes(&self) -> impl Stream<Item = MarketState> + Send + 'static {
        futures_util::stream::unfold(self.shared.state.subscribe(), |mut rx| async move {
            rx.changed().await.ok()?;
            let snapshot = rx.borrow_and_update().clone();
            Some((snapshot, rx))
        })
    }
}

impl<S> Drop for MarketPoller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_poll_loop<S>(shared: Arc<Shared<S>>, tick: Duration)
where
    S: DataSource<Key = MarketQuery, Value = Vec<Asset>>,
{
    let mut interval = tokio::time::interval(tick);
    // A tick that comes due while a fetch is outstanding is dropped.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if shared.is_stopped() {
            return;
        }

        tracing::debug!("Market poll tick");
        if let FetchOutcome::Discarded = shared.fetch().await {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EmptyPage;

    #[async_trait]
    impl DataSource for EmptyPage {
        type Key = MarketQuery;
        type Value = Vec<Asset>;

        async fn load(&self, _: &MarketQuery) -> Result<Vec<Asset>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn poller() -> MarketPoller<EmptyPage> {
        MarketPoller::new(EmptyPage, MarketQuery::default())
    }

    #[tokio::test]
    async fn test_stop_before_start_is_terminal() {
        let poller = poller();
        poller.stop();
        assert_eq!(poller.status(), PollerStatus::Stopped);
        assert!(matches!(
            poller.start(Duration::from_secs(1)),
            Err(MonitorError::TornDown)
        ));
        assert_eq!(poller.status(), PollerStatus::Stopped);
        assert!(poller.task.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_start_twice_is_noop() {
        let poller = poller();
        poller.start(Duration::from_secs(1)).unwrap();
        poller.start(Duration::from_secs(1)).unwrap();
        assert!(poller.is_running());
        poller.stop();
        assert_eq!(poller.status(), PollerStatus::Stopped);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_stop_racing_start_always_tears_down() {
        for _ in 0..500 {
            let poller = Arc::new(poller());

            let starter = {
                let poller = Arc::clone(&poller);
                tokio::spawn(async move {
                    let _ = poller.start(Duration::from_secs(60));
                })
            };
            let stopper = {
                let poller = Arc::clone(&poller);
                tokio::spawn(async move { poller.stop() })
            };
            starter.await.unwrap();
            stopper.await.unwrap();

            assert_eq!(poller.status(), PollerStatus::Stopped);
            assert!(poller.task.lock().unwrap().is_none());
            assert!(matches!(
                poller.start(Duration::from_secs(60)),
                Err(MonitorError::TornDown)
            ));
            assert!(matches!(poller.fetch().await, FetchOutcome::Discarded));
            assert_eq!(poller.show_more(), 5);
        }
    }
}

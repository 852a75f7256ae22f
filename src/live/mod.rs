//! Live-update detection.
//!
//! Each feed session owns one [`LivePoll`] task. On a fixed interval it
//! re-derives the upstream "newest marker" for the session's category and
//! raises a sticky flag when that marker moves past the baseline captured
//! at feed load. It never touches the feed itself; the user decides when
//! to reload. Replacing the session drops the task, so two loops never
//! overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::app::error::Result;
use crate::domain::{Category, ItemId};
use crate::source::ItemSource;

pub const DEFAULT_POLL_SECS: u64 = 5;

pub struct LivePoll {
    fresh: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl LivePoll {
    pub fn spawn(
        source: Arc<dyn ItemSource>,
        category: Category,
        baseline: Option<ItemId>,
        every: Duration,
    ) -> Self {
        let fresh = Arc::new(AtomicBool::new(false));
        let flag = fresh.clone();

        let handle = tokio::spawn(async move {
            let mut timer = interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately; the first real check is one period in
            timer.tick().await;

            loop {
                timer.tick().await;
                match observe_marker(source.as_ref(), category).await {
                    Ok(observed) => {
                        if should_signal(baseline, observed) {
                            flag.store(true, Ordering::Relaxed);
                        }
                    }
                    Err(err) => {
                        // Tick failures are swallowed; next interval retries.
                        tracing::debug!(category = %category, "live check failed: {err}");
                    }
                }
            }
        });

        Self { fresh, handle }
    }

    /// Whether newer upstream content has been observed since the session
    /// loaded. Sticky until the session is replaced.
    pub fn fresh(&self) -> bool {
        self.fresh.load(Ordering::Relaxed)
    }
}

impl Drop for LivePoll {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Current newest marker for a category.
///
/// `New` uses the source-wide `maxitem` value (the whole source is "new"),
/// every other category takes the highest id of a fresh listing fetch. The
/// feed baseline is derived the same way, so the comparison is apples to
/// apples.
pub async fn observe_marker(
    source: &dyn ItemSource,
    category: Category,
) -> Result<Option<ItemId>> {
    match category {
        Category::New => source.max_item_id().await.map(Some),
        _ => Ok(source.list_ids(category).await?.into_iter().max()),
    }
}

/// The signal fires iff a marker was observed and strictly exceeds the
/// baseline. An empty feed at load time (no baseline) never signals.
pub fn should_signal(baseline: Option<ItemId>, observed: Option<ItemId>) -> bool {
    matches!((baseline, observed), (Some(base), Some(seen)) if seen > base)
}

//! The feed pipeline: id-list loading, page resolution and the per-view
//! [`FeedSession`] that owns the snapshot, the cursor and the live poll.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Category, Item, ItemId};
use crate::live::LivePoll;
use crate::source::{BatchResolver, ItemSource, Resolution};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Ordered id snapshot for a category: fetched once, sorted strictly
/// descending (newest first) regardless of source order, duplicates
/// removed. A transport failure degrades to an empty feed rather than an
/// error; the next user action is the retry path.
pub async fn load_ids(source: &dyn ItemSource, category: Category) -> Vec<ItemId> {
    match source.list_ids(category).await {
        Ok(mut ids) => {
            ids.sort_unstable_by(|a, b| b.cmp(a));
            ids.dedup();
            ids
        }
        Err(err) => {
            tracing::warn!(category = %category, "failed to list ids: {err}");
            Vec::new()
        }
    }
}

/// One resolved feed page.
#[derive(Debug)]
pub struct FeedPage {
    /// Renderable items, in id-list order. May hold fewer than `page_size`
    /// entries; skipped ids still consume their page slots.
    pub items: Vec<Item>,
    /// Advanced cursor: always `cursor + page_size`, not the rendered count.
    pub cursor: usize,
    pub has_more: bool,
}

/// Resolve the window `ids[cursor .. cursor + page_size]` concurrently and
/// keep what the feed can show. Absent, failed and filtered ids are logged
/// and dropped individually; they never abort the page.
pub async fn fetch_page(
    resolver: &BatchResolver,
    ids: &[ItemId],
    cursor: usize,
    page_size: usize,
) -> FeedPage {
    let start = cursor.min(ids.len());
    let end = (cursor + page_size).min(ids.len());

    let mut items = Vec::new();
    for (id, resolution) in resolver.resolve_many(&ids[start..end]).await {
        match resolution {
            Resolution::Resolved(item) if item.is_renderable() => items.push(item),
            Resolution::Resolved(_) => tracing::debug!(id, "skipping filtered item"),
            Resolution::Missing => tracing::debug!(id, "skipping missing item"),
            Resolution::Failed(err) => tracing::debug!(id, "skipping failed item: {err}"),
        }
    }

    let cursor = cursor + page_size;
    FeedPage {
        items,
        cursor,
        has_more: cursor < ids.len(),
    }
}

/// The single active view session. Owns the id snapshot, the paging cursor
/// and the live-poll task; category switches and refreshes replace the
/// whole session rather than patching it, so stale state cannot leak
/// across loads. Dropping the session cancels its poll loop.
pub struct FeedSession {
    category: Category,
    ids: Vec<ItemId>,
    cursor: usize,
    baseline: Option<ItemId>,
    live: LivePoll,
}

impl FeedSession {
    pub async fn open(
        source: &Arc<dyn ItemSource>,
        category: Category,
        poll_every: Duration,
    ) -> Self {
        let ids = load_ids(source.as_ref(), category).await;
        // Baseline must match what the poll loop observes: source-wide
        // maxitem for New, top of the sorted snapshot otherwise.
        let baseline = match category {
            Category::New => source.max_item_id().await.ok(),
            _ => ids.first().copied(),
        };
        let live = LivePoll::spawn(source.clone(), category, baseline, poll_every);

        Self {
            category,
            ids,
            cursor: 0,
            baseline,
            live,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn total_ids(&self) -> usize {
        self.ids.len()
    }

    pub fn baseline(&self) -> Option<ItemId> {
        self.baseline
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.ids.len()
    }

    /// Newer content upstream since this session loaded. Cleared only by
    /// replacing the session (refresh or category switch).
    pub fn fresh_available(&self) -> bool {
        self.live.fresh()
    }

    pub async fn next_page(&mut self, resolver: &BatchResolver, page_size: usize) -> FeedPage {
        let page = fetch_page(resolver, &self.ids, self.cursor, page_size).await;
        self.cursor = page.cursor;
        page
    }
}

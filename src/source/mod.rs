pub mod batch;
pub mod http;

pub use batch::BatchResolver;

use async_trait::async_trait;

use crate::app::error::{EmbersError, Result};
use crate::domain::{Category, Item, ItemId};

/// Read-only view of the upstream item store.
///
/// `get_item` distinguishes "the source answered null" (`Ok(None)`) from a
/// transport failure (`Err`); callers that don't care collapse both into
/// "skip this id" via [`Resolution`].
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Current id listing for a category, in source order.
    async fn list_ids(&self, category: Category) -> Result<Vec<ItemId>>;

    /// A single item, `Ok(None)` when the source has no such id.
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>>;

    /// Highest id ever assigned by the source, across all item kinds.
    async fn max_item_id(&self) -> Result<ItemId>;
}

/// Outcome of resolving one id. All three non-item cases are treated as
/// "absent" at the point of use today; keeping them distinct preserves the
/// skip cause for logs and for future differentiated handling.
#[derive(Debug)]
pub enum Resolution {
    Resolved(Item),
    /// Valid request, no such item upstream.
    Missing,
    /// Transport or decode failure for this id only.
    Failed(EmbersError),
}

impl Resolution {
    pub fn into_item(self) -> Option<Item> {
        match self {
            Resolution::Resolved(item) => Some(item),
            Resolution::Missing | Resolution::Failed(_) => None,
        }
    }
}

impl From<Result<Option<Item>>> for Resolution {
    fn from(fetched: Result<Option<Item>>) -> Self {
        match fetched {
            Ok(Some(item)) => Resolution::Resolved(item),
            Ok(None) => Resolution::Missing,
            Err(err) => Resolution::Failed(err),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory `ItemSource` used by the pipeline tests.

    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ItemKind;

    #[derive(Default)]
    pub(crate) struct StaticSource {
        pub listings: HashMap<Category, Vec<ItemId>>,
        pub items: HashMap<ItemId, Item>,
        /// Ids whose item fetch fails with a transport error.
        pub broken: HashSet<ItemId>,
        /// When set, every listing fetch fails.
        pub listing_down: bool,
        pub max_id: ItemId,
    }

    impl StaticSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_listing(mut self, category: Category, ids: Vec<ItemId>) -> Self {
            self.listings.insert(category, ids);
            self
        }

        pub fn with_item(mut self, item: Item) -> Self {
            self.max_id = self.max_id.max(item.id);
            self.items.insert(item.id, item);
            self
        }

        pub fn with_broken(mut self, id: ItemId) -> Self {
            self.broken.insert(id);
            self
        }
    }

    #[async_trait]
    impl ItemSource for StaticSource {
        async fn list_ids(&self, category: Category) -> Result<Vec<ItemId>> {
            if self.listing_down {
                return Err(EmbersError::Other("listing unavailable".into()));
            }
            Ok(self.listings.get(&category).cloned().unwrap_or_default())
        }

        async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
            if self.broken.contains(&id) {
                return Err(EmbersError::Other(format!("fetch failed for {id}")));
            }
            Ok(self.items.get(&id).cloned())
        }

        async fn max_item_id(&self) -> Result<ItemId> {
            Ok(self.max_id)
        }
    }

    pub(crate) fn story(id: ItemId, title: &str) -> Item {
        Item {
            id,
            kind: ItemKind::Story,
            by: Some("tester".into()),
            time: Some(id as i64),
            title: Some(title.into()),
            ..Item::default()
        }
    }

    pub(crate) fn comment(id: ItemId, time: i64, kids: Vec<ItemId>) -> Item {
        Item {
            id,
            kind: ItemKind::Comment,
            by: Some(format!("user{id}")),
            time: Some(time),
            text: Some(format!("comment {id}")),
            kids,
            ..Item::default()
        }
    }
}

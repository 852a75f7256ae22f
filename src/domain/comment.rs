use super::item::{Item, ItemId};

/// One comment in a resolved thread. Threads are emitted as a flat
/// pre-order sequence; `depth` drives indentation (direct replies to the
/// root are depth 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub id: ItemId,
    pub author: Option<String>,
    pub text: Option<String>,
    pub time: Option<i64>,
    pub depth: usize,
}

impl CommentNode {
    pub fn from_item(item: Item, depth: usize) -> Self {
        Self {
            id: item.id,
            author: item.by,
            text: item.text,
            time: item.time,
            depth,
        }
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or("[unknown]")
    }
}

/// A resolved poll option. At least one of `text` and `votes` is present;
/// options with neither are dropped during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub id: ItemId,
    pub text: Option<String>,
    pub votes: Option<i64>,
}

impl PollOption {
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or("Option")
    }

    pub fn vote_count(&self) -> i64 {
        self.votes.unwrap_or(0)
    }
}

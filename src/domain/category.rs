use std::fmt;

use serde::{Deserialize, Serialize};

/// A feed category. Selecting one discards the entire feed session and
/// starts over from a fresh id snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Top,
    New,
    Jobs,
    Polls,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Top, Category::New, Category::Jobs, Category::Polls];

    /// Firebase listing endpoint name, or `None` for categories without a
    /// direct listing (polls are discovered through Algolia tag search).
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Category::Top => Some("topstories"),
            Category::New => Some("newstories"),
            Category::Jobs => Some("jobstories"),
            Category::Polls => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Top => "Top",
            Category::New => "New",
            Category::Jobs => "Jobs",
            Category::Polls => "Polls",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Category::Top => Category::New,
            Category::New => Category::Jobs,
            Category::Jobs => Category::Polls,
            Category::Polls => Category::Top,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::Top => Category::Polls,
            Category::New => Category::Top,
            Category::Jobs => Category::New,
            Category::Polls => Category::Jobs,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Category::Top),
            "new" => Ok(Category::New),
            "jobs" | "job" => Ok(Category::Jobs),
            "polls" | "poll" => Ok(Category::Polls),
            _ => Err(format!(
                "unknown category: {} (expected top, new, jobs or polls)",
                s
            )),
        }
    }
}

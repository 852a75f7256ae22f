use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

/// Upstream item id. Assigned once by the source and monotonically
/// non-decreasing with creation time, which is what both the newest-first
/// ordering and the live-update check rely on.
pub type ItemId = u64;

/// Landing page for an item on news.ycombinator.com, used when a story has
/// no external URL of its own.
pub const ITEM_PAGE_URL: &str = "https://news.ycombinator.com/item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Story,
    Job,
    Comment,
    Poll,
    Pollopt,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A single item as served by the Firebase API. Every field except `id` may
/// be missing upstream; deleted items in particular come back as a bare
/// `{"id": ..., "deleted": true}` husk.
///
/// Items are fetched lazily and never cached, so two fetches of the same id
/// may observe different content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub kids: Vec<ItemId>,
    #[serde(default)]
    pub parts: Vec<ItemId>,
    #[serde(default)]
    pub descendants: Option<u32>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
}

impl Item {
    /// Feed display policy: flagged items and removed-but-not-deleted husks
    /// (no title, no text, no URL) are skipped.
    pub fn is_renderable(&self) -> bool {
        if self.deleted || self.dead {
            return false;
        }
        self.title.is_some() || self.text.is_some() || self.url.is_some()
    }

    /// Comment display policy: a comment only needs to exist and not be
    /// flagged. An item too bare for the feed still shows up in a thread.
    pub fn is_live_comment(&self) -> bool {
        !self.deleted && !self.dead
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(no title)")
    }

    pub fn display_author(&self) -> &str {
        self.by.as_deref().unwrap_or("[unknown]")
    }

    /// Host of the external URL, for the "(example.com)" suffix on story rows.
    pub fn host(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        let parsed = Url::parse(url).ok()?;
        parsed.host_str().map(|h| h.trim_start_matches("www.").to_string())
    }

    /// External URL if the story has one, its HN page otherwise.
    pub fn link(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("{}?id={}", ITEM_PAGE_URL, self.id),
        }
    }

    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Flatten item HTML to plain text: tags stripped, entities decoded,
/// `<p>` boundaries kept as blank lines.
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find('>') {
            Some(close) => {
                let tag = &after[1..close];
                if tag.eq_ignore_ascii_case("p") {
                    text.push_str("\n\n");
                } else if tag.eq_ignore_ascii_case("br") || tag.eq_ignore_ascii_case("br/") {
                    text.push('\n');
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated tag, drop the remainder.
                rest = "";
            }
        }
    }
    text.push_str(rest);

    html_escape::decode_html_entities(text.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(title: Option<&str>, text: Option<&str>, url: Option<&str>) -> Item {
        Item {
            id: 1,
            kind: ItemKind::Story,
            title: title.map(String::from),
            text: text.map(String::from),
            url: url.map(String::from),
            ..Item::default()
        }
    }

    #[test]
    fn deserializes_a_story() {
        let json = r#"{
            "id": 8863,
            "type": "story",
            "by": "dhouston",
            "time": 1175714200,
            "title": "My YC app: Dropbox",
            "url": "http://www.getdropbox.com/u/2/screencast.html",
            "score": 111,
            "descendants": 71,
            "kids": [9224, 8917]
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 8863);
        assert_eq!(item.kind, ItemKind::Story);
        assert_eq!(item.by.as_deref(), Some("dhouston"));
        assert_eq!(item.kids, vec![9224, 8917]);
        assert!(!item.deleted);
        assert!(item.is_renderable());
    }

    #[test]
    fn deserializes_a_deleted_husk() {
        let json = r#"{"id": 5, "deleted": true, "type": "comment"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.deleted);
        assert!(!item.is_renderable());
        assert!(!item.is_live_comment());
    }

    #[test]
    fn unknown_kind_falls_back() {
        let json = r#"{"id": 6, "type": "blogpost"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::Unknown);
    }

    #[test]
    fn empty_husk_is_not_renderable() {
        assert!(!story(None, None, None).is_renderable());
        assert!(story(Some("t"), None, None).is_renderable());
        assert!(story(None, Some("body"), None).is_renderable());
        assert!(story(None, None, Some("https://x.org")).is_renderable());
    }

    #[test]
    fn dead_item_is_excluded_everywhere() {
        let mut item = story(Some("t"), None, None);
        item.dead = true;
        assert!(!item.is_renderable());
        assert!(!item.is_live_comment());
    }

    #[test]
    fn bare_comment_is_still_a_live_comment() {
        let comment = Item {
            id: 2,
            kind: ItemKind::Comment,
            by: Some("pg".into()),
            text: Some("nice".into()),
            ..Item::default()
        };
        assert!(comment.is_live_comment());
        assert!(comment.is_renderable()); // has text
    }

    #[test]
    fn host_strips_www() {
        let item = story(Some("t"), None, Some("https://www.example.com/a/b"));
        assert_eq!(item.host().as_deref(), Some("example.com"));
        assert_eq!(story(Some("t"), None, None).host(), None);
    }

    #[test]
    fn link_falls_back_to_item_page() {
        let item = story(Some("t"), None, None);
        assert_eq!(item.link(), "https://news.ycombinator.com/item?id=1");
        let item = story(Some("t"), None, Some("https://example.com"));
        assert_eq!(item.link(), "https://example.com");
    }

    #[test]
    fn plain_text_strips_tags_and_decodes_entities() {
        let html = "I&#x27;m a fan of <i>italics</i>.<p>Second paragraph &amp; more.";
        assert_eq!(
            plain_text(html),
            "I'm a fan of italics.\n\nSecond paragraph & more."
        );
    }

    #[test]
    fn plain_text_keeps_line_breaks() {
        assert_eq!(plain_text("a<br>b"), "a\nb");
        assert_eq!(plain_text("plain"), "plain");
    }
}

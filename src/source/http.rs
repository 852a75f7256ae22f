use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::app::error::Result;
use crate::domain::{Category, Item, ItemId};
use crate::source::ItemSource;

pub const FIREBASE_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";
pub const ALGOLIA_API_BASE: &str = "https://hn.algolia.com/api/v1";

/// How many recent polls the Algolia tag search samples. Polls older than
/// this window are not discoverable; accepted completeness limitation of
/// the tag-search strategy.
pub const POLL_SAMPLE_SIZE: usize = 100;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Live client for the Firebase item API, with Algolia search as the
/// poll-discovery side channel.
pub struct HttpSource {
    client: Client,
    firebase_base: String,
    algolia_base: String,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(concat!("embers/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            firebase_base: FIREBASE_API_BASE.to_string(),
            algolia_base: ALGOLIA_API_BASE.to_string(),
        }
    }

    async fn poll_ids(&self, limit: usize) -> Result<Vec<ItemId>> {
        let url = format!(
            "{}/search_by_date?tags=poll&hitsPerPage={}",
            self.algolia_base, limit
        );
        let response: SearchResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.ids())
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl ItemSource for HttpSource {
    async fn list_ids(&self, category: Category) -> Result<Vec<ItemId>> {
        match category.endpoint() {
            Some(name) => {
                let url = format!("{}/{}.json", self.firebase_base, name);
                let ids = self
                    .client
                    .get(&url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                Ok(ids)
            }
            None => self.poll_ids(POLL_SAMPLE_SIZE).await,
        }
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        let url = format!("{}/item/{}.json", self.firebase_base, id);
        // Firebase answers a literal `null` for ids it does not know.
        let item: Option<Item> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(item)
    }

    async fn max_item_id(&self) -> Result<ItemId> {
        let url = format!("{}/maxitem.json", self.firebase_base);
        let id = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(id)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "objectID")]
    object_id: String,
}

impl SearchResponse {
    /// Hit ids in response order (newest first); hits with a non-numeric id
    /// are skipped.
    fn ids(self) -> Vec<ItemId> {
        self.hits
            .into_iter()
            .filter_map(|hit| hit.object_id.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_extracts_numeric_ids() {
        let json = r#"{
            "hits": [
                {"objectID": "44124290", "title": "Poll A"},
                {"objectID": "not-a-number"},
                {"objectID": "43000000"}
            ],
            "nbHits": 3
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.ids(), vec![44124290, 43000000]);
    }

    #[test]
    fn null_item_body_decodes_to_none() {
        let item: Option<Item> = serde_json::from_str("null").unwrap();
        assert!(item.is_none());
    }
}

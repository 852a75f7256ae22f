use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::source::http::HttpSource;
use crate::source::{BatchResolver, ItemSource};

/// Wires the item source, the batch resolver and the loaded configuration
/// together. One context serves the whole process; feed sessions borrow
/// the source through it.
pub struct AppContext {
    pub source: Arc<dyn ItemSource>,
    pub resolver: BatchResolver,
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config, workers: usize) -> Self {
        let timeout = Duration::from_secs(config.feed.http_timeout_secs);
        let source: Arc<dyn ItemSource> = Arc::new(HttpSource::new(timeout));
        Self::with_source(config, workers, source)
    }

    pub fn with_source(config: Config, workers: usize, source: Arc<dyn ItemSource>) -> Self {
        let resolver = BatchResolver::with_workers(source.clone(), workers);
        Self {
            source,
            resolver,
            config,
        }
    }

    pub fn page_size(&self) -> usize {
        // A zero page size would never advance the cursor.
        self.config.feed.page_size.max(1)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.feed.live_poll_secs)
    }
}

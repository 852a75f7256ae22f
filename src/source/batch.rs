use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::app::error::EmbersError;
use crate::domain::ItemId;
use crate::source::{ItemSource, Resolution};

pub const DEFAULT_WORKERS: usize = 10;

/// Resolves batches of ids against the source concurrently.
///
/// All fetches in a batch are issued up front (bounded by the worker
/// semaphore) and joined in request order, so the output order never
/// depends on completion order. A failure resolves that id alone; the rest
/// of the batch is unaffected.
pub struct BatchResolver {
    source: Arc<dyn ItemSource>,
    semaphore: Arc<Semaphore>,
}

impl BatchResolver {
    pub fn new(source: Arc<dyn ItemSource>) -> Self {
        Self::with_workers(source, DEFAULT_WORKERS)
    }

    pub fn with_workers(source: Arc<dyn ItemSource>, workers: usize) -> Self {
        Self {
            source,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub async fn resolve_many(&self, ids: &[ItemId]) -> Vec<(ItemId, Resolution)> {
        let mut handles = Vec::with_capacity(ids.len());

        for &id in ids {
            let source = self.source.clone();
            let semaphore = self.semaphore.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("Semaphore closed");
                Resolution::from(source.get_item(id).await)
            }));
        }

        let mut results = Vec::with_capacity(ids.len());
        for (&id, handle) in ids.iter().zip(handles) {
            match handle.await {
                Ok(resolution) => results.push((id, resolution)),
                Err(err) => {
                    tracing::error!(id, "resolve task panicked: {err}");
                    results.push((id, Resolution::Failed(EmbersError::Other(err.to_string()))));
                }
            }
        }

        results
    }
}

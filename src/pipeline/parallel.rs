//! Async batch enrichment over the blocking pool.
//!
//! Each person's enrichment is blocking (HTTP and DNS), so it runs under
//! `tokio::task::spawn_blocking`. At most `workers` people are in flight and
//! rows come back in result order.

use super::enrichment::{dedupe_results, BatchOutcome, BatchRequest, Enricher};
use crate::models::EnrichedRow;
use crate::storage::SeenUrls;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct ParallelEnricher {
    enricher: Arc<Enricher>,
    workers: usize,
}

impl ParallelEnricher {
    pub fn new(enricher: Enricher, workers: usize) -> Self {
        Self {
            enricher: Arc::new(enricher),
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Same output as [`Enricher::run_batch`], with people enriched
    /// concurrently.
    pub async fn run_batch(&self, request: &BatchRequest, seen: SeenUrls) -> BatchOutcome {
        let enricher = self.enricher.clone();
        let query_request = request.clone();
        let queries = match tokio::task::spawn_blocking(move || enricher.run_queries(&query_request))
            .await
        {
            Ok(queries) => queries,
            Err(e) => {
                error!("Search task failed: {}", e);
                Vec::new()
            }
        };

        let (unique, seen) = dedupe_results(&queries, request, seen);
        info!(
            "{} unique URL(s) after dedupe, enriching with {} worker(s)",
            unique.len(),
            self.workers
        );

        let rows = stream::iter(unique.clone())
            .map(|result| {
                let enricher = self.enricher.clone();
                let request = request.clone();
                async move {
                    let source_url = result.url.clone();
                    tokio::task::spawn_blocking(move || enricher.enrich(&result, &request))
                        .await
                        .unwrap_or_else(|e| {
                            // Keep the row so output stays aligned with results
                            error!("Enrichment task for {} failed: {}", source_url, e);
                            EnrichedRow {
                                source_url,
                                ..EnrichedRow::default()
                            }
                        })
                }
            })
            .buffered(self.workers)
            .collect::<Vec<_>>()
            .await;

        BatchOutcome {
            queries,
            unique,
            rows,
            seen,
        }
    }
}

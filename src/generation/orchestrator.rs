//! Batch orchestrator: drives a [`BatchSource`] across the batches of one run.
//! Owns the run accumulator; a failed batch is skipped, never retried here and never fatal.

use crate::error::ApiError;
use crate::generation::batch::{BatchSource, ContentKind};
use crate::generation::plan::BatchPlan;
use crate::generation::request::{CategoryContext, Distribution, GeneratedItem, GenerationRequest};
use std::time::Duration;
use tracing::{info, warn};

/// What one batch asked for and got back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// 0-based batch index
    pub index: usize,
    pub requested: usize,
    pub received: usize,
}

impl BatchReport {
    pub fn skipped(&self) -> bool {
        self.received == 0
    }
}

/// Result of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome<T> {
    pub category: CategoryContext,
    pub requested: usize,
    pub items: Vec<T>,
    pub batches: Vec<BatchReport>,
    pub distribution: Option<Distribution>,
}

impl<T> RunOutcome<T> {
    pub fn skipped_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.skipped()).count()
    }
}

/// Mutable state of a run in progress.
struct RunAccumulator<T> {
    items: Vec<T>,
    names: Vec<String>,
    distribution: Option<Distribution>,
}

impl<T: GeneratedItem> RunAccumulator<T> {
    fn new(distribution: Option<Distribution>) -> Self {
        Self {
            items: Vec::new(),
            names: Vec::new(),
            distribution,
        }
    }

    fn exclusion_context(&self, window: Option<usize>) -> Vec<String> {
        let start = window
            .map(|w| self.names.len().saturating_sub(w))
            .unwrap_or(0);
        self.names[start..].to_vec()
    }

    fn absorb(&mut self, batch: Vec<T>) {
        for item in &batch {
            if let Some(name) = item.name() {
                self.names.push(name.to_string());
            }
            if let (Some(dist), Some(label)) = (self.distribution.as_mut(), item.distribution_label()) {
                dist.record(label);
            }
        }
        self.items.extend(batch);
    }
}

/// Sequential batch driver.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    batch_delay: Duration,
    exclusion_window: Option<usize>,
    distribution_labels: Option<Vec<String>>,
}

impl BatchOrchestrator {
    pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);

    pub fn new(batch_delay: Duration) -> Self {
        Self {
            batch_delay,
            exclusion_window: None,
            distribution_labels: None,
        }
    }

    /// Orchestrator carrying the kind's exclusion window and distribution label set.
    pub fn for_kind<K: ContentKind>(kind: &K, batch_delay: Duration) -> Self {
        Self {
            batch_delay,
            exclusion_window: kind.exclusion_window(),
            distribution_labels: kind.distribution_labels(),
        }
    }

    pub fn with_exclusion_window(mut self, window: usize) -> Self {
        self.exclusion_window = Some(window);
        self
    }

    pub fn with_distribution_labels(mut self, labels: Vec<String>) -> Self {
        self.distribution_labels = Some(labels);
        self
    }

    pub async fn run<T, S>(
        &self,
        source: &S,
        total_count: usize,
        batch_size: usize,
        category: &CategoryContext,
    ) -> Result<RunOutcome<T>, ApiError>
    where
        T: GeneratedItem,
        S: BatchSource<T>,
    {
        let plan = BatchPlan::new(total_count, batch_size)?;
        let batch_count = plan.batch_count();
        let mut acc: RunAccumulator<T> =
            RunAccumulator::new(self.distribution_labels.clone().map(Distribution::with_labels));
        let mut batches = Vec::with_capacity(batch_count);

        info!(
            category = %category.key,
            total_count,
            batch_size,
            batch_count,
            "Run started"
        );

        for index in 0..batch_count {
            let requested = plan.request_size(acc.items.len());
            let received = if requested == 0 {
                warn!(
                    category = %category.key,
                    batch = index + 1,
                    batch_count,
                    "Target already reached; batch skipped"
                );
                0
            } else {
                info!(
                    category = %category.key,
                    batch = index + 1,
                    batch_count,
                    requested,
                    "Batch started"
                );
                let request = GenerationRequest::new(
                    requested,
                    category.clone(),
                    acc.exclusion_context(self.exclusion_window),
                    acc.distribution.clone(),
                )?;
                let batch = source.generate_batch(&request).await;
                let received = batch.len();
                if batch.is_empty() {
                    warn!(
                        category = %category.key,
                        batch = index + 1,
                        batch_count,
                        "Batch failed, skipping"
                    );
                } else {
                    acc.absorb(batch);
                    info!(
                        category = %category.key,
                        batch = index + 1,
                        collected = acc.items.len(),
                        total_count,
                        "Batch absorbed"
                    );
                }
                received
            };

            batches.push(BatchReport {
                index,
                requested,
                received,
            });

            tokio::time::sleep(self.batch_delay).await;
        }

        info!(
            category = %category.key,
            collected = acc.items.len(),
            total_count,
            skipped = batches.iter().filter(|b| b.skipped()).count(),
            "Run completed"
        );

        Ok(RunOutcome {
            category: category.clone(),
            requested: total_count,
            items: acc.items,
            batches,
            distribution: acc.distribution,
        })
    }
}

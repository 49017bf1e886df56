//! Pipeline: run every target key of a command, then read-merge-write its document.

use crate::catalog::categories::BENTO_CATEGORIES;
use crate::catalog::{bento_categories, bento_category, side_dish_category, SIDE_DISHES_KEY};
use crate::document::{items_to_values, merge, DocumentStore};
use crate::error::ApiError;
use crate::generation::{
    BatchGenerator, BatchOrchestrator, CategoryContext, ContentKind, Distribution, RetryPolicy,
};
use crate::kinds::simple_main_dishes::SIMPLE_CATEGORY_KEY;
use crate::kinds::{MainDishKind, RecipeKind, SideDishKind, SimpleMainDishKind};
use crate::provider::GenerationClient;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// One generation command and the document it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCommand {
    Recipes,
    MainDishes,
    SimpleMainDishes,
    SideDishes,
}

impl ContentCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ContentCommand::Recipes => "recipes",
            ContentCommand::MainDishes => "main-dishes",
            ContentCommand::SimpleMainDishes => "simple-main-dishes",
            ContentCommand::SideDishes => "side-dishes",
        }
    }

    /// Items requested per key when no count is given.
    pub fn default_count(&self) -> usize {
        match self {
            ContentCommand::SideDishes => 100,
            _ => 50,
        }
    }

    /// Keys a fresh document is seeded with.
    pub fn known_keys(&self) -> Vec<&'static str> {
        match self {
            ContentCommand::SideDishes => vec![SIDE_DISHES_KEY],
            _ => BENTO_CATEGORIES
                .iter()
                .map(|(key, _, _)| *key)
                .collect(),
        }
    }

    /// Categories to generate, narrowed by `selected` when it is non-empty.
    pub fn target_categories(&self, selected: &[String]) -> Result<Vec<CategoryContext>, ApiError> {
        match self {
            ContentCommand::Recipes | ContentCommand::MainDishes => {
                if selected.is_empty() {
                    return Ok(bento_categories());
                }
                let mut targets: Vec<CategoryContext> = Vec::new();
                for key in selected {
                    let category = bento_category(key)?;
                    if !targets.iter().any(|c| c.key == category.key) {
                        targets.push(category);
                    }
                }
                Ok(targets)
            }
            ContentCommand::SimpleMainDishes => {
                only_key(self, selected, SIMPLE_CATEGORY_KEY)?;
                Ok(vec![bento_category(SIMPLE_CATEGORY_KEY)?])
            }
            ContentCommand::SideDishes => {
                only_key(self, selected, SIDE_DISHES_KEY)?;
                Ok(vec![side_dish_category()])
            }
        }
    }
}

fn only_key(command: &ContentCommand, selected: &[String], allowed: &str) -> Result<(), ApiError> {
    match selected.iter().find(|k| k.as_str() != allowed) {
        Some(key) => Err(ApiError::InvalidRequest(format!(
            "{} only generates the \"{}\" key, got \"{}\"",
            command.name(),
            allowed,
            key
        ))),
        None => Ok(()),
    }
}

/// Pacing and retry knobs shared by every run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub retry: RetryPolicy,
    pub batch_delay: Duration,
    pub side_dish_exclusion_window: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            batch_delay: BatchOrchestrator::DEFAULT_BATCH_DELAY,
            side_dish_exclusion_window: SideDishKind::DEFAULT_EXCLUSION_WINDOW,
        }
    }
}

/// What to generate and where to write it.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub command: ContentCommand,
    /// Items per key
    pub count: usize,
    pub batch_size: usize,
    /// Empty means every key of the command
    pub categories: Vec<String>,
    pub output_path: PathBuf,
}

/// Outcome for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySummary {
    pub key: String,
    pub name: String,
    pub requested: usize,
    pub produced: usize,
    pub batches: usize,
    pub skipped_batches: usize,
}

/// Outcome of a whole command.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub command: ContentCommand,
    pub output_path: PathBuf,
    pub keys: Vec<KeySummary>,
    /// Cooking-method tally, side dishes only
    pub distribution: Option<Distribution>,
    /// Item count per key of the written document
    pub document_counts: Vec<(String, usize)>,
}

impl PipelineSummary {
    pub fn total_produced(&self) -> usize {
        self.keys.iter().map(|k| k.produced).sum()
    }

    pub fn total_requested(&self) -> usize {
        self.keys.iter().map(|k| k.requested).sum()
    }
}

struct KindResult {
    updates: Vec<(String, Vec<Value>)>,
    keys: Vec<KeySummary>,
    distribution: Option<Distribution>,
}

async fn run_kind<K, C>(
    kind: &K,
    client: &C,
    categories: &[CategoryContext],
    request: &PipelineRequest,
    settings: &PipelineSettings,
) -> Result<KindResult, ApiError>
where
    K: ContentKind,
    C: GenerationClient + ?Sized,
{
    let generator = BatchGenerator::new(kind, client, settings.retry);
    let orchestrator = BatchOrchestrator::for_kind(kind, settings.batch_delay);

    let mut result = KindResult {
        updates: Vec::with_capacity(categories.len()),
        keys: Vec::with_capacity(categories.len()),
        distribution: None,
    };
    for category in categories {
        let outcome = orchestrator
            .run(&generator, request.count, request.batch_size, category)
            .await?;
        result.keys.push(KeySummary {
            key: category.key.clone(),
            name: category.name.clone(),
            requested: outcome.requested,
            produced: outcome.items.len(),
            batches: outcome.batches.len(),
            skipped_batches: outcome.skipped_batches(),
        });
        result
            .updates
            .push((category.key.clone(), items_to_values(&outcome.items)?));
        if outcome.distribution.is_some() {
            result.distribution = outcome.distribution;
        }
    }
    Ok(result)
}

/// Generate every target key, merge into the existing document and save it.
///
/// Generation failures only shrink the output; a failed save is an error.
pub async fn run_pipeline<C>(
    client: &C,
    request: &PipelineRequest,
    settings: &PipelineSettings,
) -> Result<PipelineSummary, ApiError>
where
    C: GenerationClient + ?Sized,
{
    if request.count == 0 {
        return Err(ApiError::InvalidRequest("count must be at least 1".to_string()));
    }
    if request.batch_size == 0 {
        return Err(ApiError::InvalidRequest("batch size must be at least 1".to_string()));
    }
    let categories = request.command.target_categories(&request.categories)?;

    info!(
        command = request.command.name(),
        keys = categories.len(),
        count = request.count,
        batch_size = request.batch_size,
        provider = client.provider_name(),
        model = client.model_name(),
        "Pipeline started"
    );

    let result = match request.command {
        ContentCommand::Recipes => {
            run_kind(&RecipeKind, client, &categories, request, settings).await?
        }
        ContentCommand::MainDishes => {
            run_kind(&MainDishKind, client, &categories, request, settings).await?
        }
        ContentCommand::SimpleMainDishes => {
            run_kind(&SimpleMainDishKind, client, &categories, request, settings).await?
        }
        ContentCommand::SideDishes => {
            let kind = SideDishKind::new(settings.side_dish_exclusion_window);
            run_kind(&kind, client, &categories, request, settings).await?
        }
    };

    let store = DocumentStore::new(&request.output_path);
    let known_keys = request.command.known_keys();
    let doc = merge(store.load(), &known_keys, result.updates);
    store.save(&doc)?;

    let summary = PipelineSummary {
        command: request.command,
        output_path: request.output_path.clone(),
        keys: result.keys,
        distribution: result.distribution,
        document_counts: doc.key_counts(),
    };
    info!(
        command = request.command.name(),
        produced = summary.total_produced(),
        requested = summary.total_requested(),
        path = %summary.output_path.display(),
        "Pipeline completed"
    );
    Ok(summary)
}

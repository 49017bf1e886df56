//! Request-side types shared by the batch generator and the orchestrator.

use crate::error::ApiError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record produced by the generation backend.
pub trait GeneratedItem: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Name used for the exclusion context; expected to be unique within a run.
    ///
    /// `None` when the backend left it out; such items are kept but never excluded.
    fn name(&self) -> Option<&str>;

    /// Sub-category label counted by the distribution context, if the kind tracks one.
    fn distribution_label(&self) -> Option<&str> {
        None
    }
}

/// Target category or kind the prompt is written for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContext {
    /// Key in the output document (`omakase`, `sideDishes`, ...)
    pub key: String,
    /// Display name used in prompts and summaries
    pub name: String,
    pub description: String,
}

impl CategoryContext {
    pub fn new(key: &str, name: &str, description: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Running tally per label over a fixed label set, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    counts: IndexMap<String, u32>,
}

impl Distribution {
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: labels.into_iter().map(|l| (l.into(), 0)).collect(),
        }
    }

    /// Count one occurrence; labels outside the set are ignored. Returns whether it counted.
    pub fn record(&mut self, label: &str) -> bool {
        match self.counts.get_mut(label) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, label: &str) -> u32 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Entries sorted by count, highest first; ties keep declaration order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// One bounded ask to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub desired_count: usize,
    pub category: CategoryContext,
    /// Previously produced names, oldest first
    pub exclusion: Vec<String>,
    pub distribution: Option<Distribution>,
}

impl GenerationRequest {
    pub fn new(
        desired_count: usize,
        category: CategoryContext,
        exclusion: Vec<String>,
        distribution: Option<Distribution>,
    ) -> Result<Self, ApiError> {
        if desired_count == 0 {
            return Err(ApiError::InvalidRequest(
                "desired_count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            desired_count,
            category,
            exclusion,
            distribution,
        })
    }
}

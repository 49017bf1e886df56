//! Output documents: read-merge-write of the preset JSON files.
//!
//! A document is a top-level JSON object mapping a category key to an array of items.
//! Keys keep their on-disk order; keys not touched by a run are carried over unchanged.

use crate::error::StorageError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Top-level key -> item array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDocument {
    entries: Map<String, Value>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every key mapped to an empty array.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = keys
            .into_iter()
            .map(|k| (k.into(), Value::Array(Vec::new())))
            .collect();
        Self { entries }
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(text).map_err(|e| e.to_string())? {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(format!(
                "expected a top-level object, found {}",
                json_type_name(&other)
            )),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Replace one key's array wholesale, appending the key if new.
    pub fn set_items(&mut self, key: &str, items: Vec<Value>) {
        self.entries.insert(key.to_string(), Value::Array(items));
    }

    /// Item count per key; non-array values count as 0.
    pub fn key_counts(&self) -> Vec<(String, usize)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.as_array().map_or(0, Vec::len)))
            .collect()
    }

    /// Two-space indented JSON with non-ASCII text written as-is.
    pub fn to_pretty_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize generated items into document values.
pub fn items_to_values<T: Serialize>(items: &[T]) -> Result<Vec<Value>, StorageError> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(|e| StorageError::Serialization(e.to_string())))
        .collect()
}

/// Combine a previous document with freshly generated keys.
///
/// With no previous document, every known key starts as an empty array. Updated keys are
/// replaced wholesale; all other keys are kept as they were.
pub fn merge(
    existing: Option<OutputDocument>,
    known_keys: &[&str],
    updates: Vec<(String, Vec<Value>)>,
) -> OutputDocument {
    let mut doc = existing.unwrap_or_else(|| OutputDocument::with_keys(known_keys.iter().copied()));
    for (key, items) in updates {
        doc.set_items(&key, items);
    }
    doc
}

/// A document file on disk.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Previous document, or `None` if missing, unreadable or malformed.
    pub fn load(&self) -> Option<OutputDocument> {
        match self.try_load() {
            Ok(doc) => doc,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Existing document ignored");
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<OutputDocument>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No existing document");
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StorageError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        OutputDocument::from_json(&text)
            .map(Some)
            .map_err(|message| StorageError::Malformed {
                path: self.path.clone(),
                message,
            })
    }

    /// Write to a sibling temp file, then rename over the target.
    pub fn save(&self, doc: &OutputDocument) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create parent directory {:?}: {}", parent, e),
                ))
            })?;
        }

        let serialized = doc.to_pretty_json()?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serialized.as_bytes()).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to write document to {:?}: {}", temp_path, e),
            ))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to move document into place at {:?}: {}", self.path, e),
            ))
        })?;

        info!(path = %self.path.display(), "Document saved");
        Ok(())
    }
}

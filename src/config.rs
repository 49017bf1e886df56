//! Configuration System
//!
//! Layered configuration: built-in defaults, a global file, workspace files and
//! `KONDATE__SECTION__KEY` environment overrides, validated before any generation starts.

use crate::generation::RetryPolicy;
use crate::logging::LoggingConfig;
use crate::pipeline::{ContentCommand, PipelineSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use crate::provider::{ProviderConfig, ProviderType};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KondateConfig {
    /// Generation backend
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Batching, retry and pacing
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Where documents are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Batching, retry and pacing knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Attempts per batch, first one included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Pause after every batch
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Most recent side-dish names fed back into the prompt
    #[serde(default = "default_side_dish_exclusion_window")]
    pub side_dish_exclusion_window: usize,
}

fn default_batch_size() -> usize {
    5
}

fn default_max_attempts() -> u32 {
    RetryPolicy::DEFAULT_MAX_ATTEMPTS
}

fn default_retry_backoff_ms() -> u64 {
    3000
}

fn default_batch_delay_ms() -> u64 {
    1000
}

fn default_side_dish_exclusion_window() -> usize {
    20
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            batch_delay_ms: default_batch_delay_ms(),
            side_dish_exclusion_window: default_side_dish_exclusion_window(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_millis(self.retry_backoff_ms),
            ),
            batch_delay: Duration::from_millis(self.batch_delay_ms),
            side_dish_exclusion_window: self.side_dish_exclusion_window,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_recipes_file")]
    pub recipes_file: String,

    #[serde(default = "default_main_dishes_file")]
    pub main_dishes_file: String,

    #[serde(default = "default_side_dishes_file")]
    pub side_dishes_file: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_recipes_file() -> String {
    "PresetRecipes.json".to_string()
}

fn default_main_dishes_file() -> String {
    "PresetMainDishes.json".to_string()
}

fn default_side_dishes_file() -> String {
    "PresetSideDishes.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            recipes_file: default_recipes_file(),
            main_dishes_file: default_main_dishes_file(),
            side_dishes_file: default_side_dishes_file(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        for name in [&self.recipes_file, &self.main_dishes_file, &self.side_dishes_file] {
            if name.trim().is_empty() {
                return Err("Output file names cannot be empty".to_string());
            }
        }
        Ok(())
    }

    /// Document file for a command; both main-dish commands share one document.
    pub fn path_for(&self, command: ContentCommand) -> PathBuf {
        let file = match command {
            ContentCommand::Recipes => &self.recipes_file,
            ContentCommand::MainDishes | ContentCommand::SimpleMainDishes => {
                &self.main_dishes_file
            }
            ContentCommand::SideDishes => &self.side_dishes_file,
        };
        self.dir.join(file)
    }

    /// Same layout under another directory.
    pub fn with_dir(mut self, dir: &Path) -> Self {
        self.dir = dir.to_path_buf();
        self
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Generation(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl KondateConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

//! Loader facade: assembles the layer stack and deserializes it.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::KondateConfig;
use crate::error::ApiError;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, workspace files, then environment overrides.
    pub fn load(workspace_root: &Path) -> Result<KondateConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);
        debug!(workspace = %workspace_root.display(), "Loading configuration");
        builder.build()?.try_deserialize()
    }

    /// Defaults, the given file (required), then environment overrides.
    pub fn load_from_file(path: &Path) -> Result<KondateConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        debug!(config_path = %path.display(), "Loading configuration file");
        builder.build()?.try_deserialize()
    }

    /// Load from `config_file` when given, otherwise from the workspace, and validate.
    pub fn load_validated(
        workspace_root: &Path,
        config_file: Option<&Path>,
    ) -> Result<KondateConfig, ApiError> {
        let config = match config_file {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
        .map_err(|e| ApiError::ConfigError(format!("Failed to load config: {}", e)))?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}

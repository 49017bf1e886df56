//! CLI route: single route table and run context. Dispatches to the pipeline and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_summary_json, format_summary_text};
use crate::config::{ConfigLoader, KondateConfig};
use crate::error::ApiError;
use crate::pipeline::{run_pipeline, PipelineRequest};
use crate::provider::{GenerationClient, ProviderFactory};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: workspace, resolved configuration and output directory.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: KondateConfig,
    output_dir: PathBuf,
}

impl RunContext {
    /// Load and validate configuration; `output_dir` overrides `output.dir`.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = ConfigLoader::load_validated(&workspace_root, config_path.as_deref())?;
        Ok(Self::from_config(workspace_root, config, output_dir))
    }

    /// Context over an already loaded configuration.
    pub fn from_config(
        workspace_root: PathBuf,
        config: KondateConfig,
        output_dir: Option<PathBuf>,
    ) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| {
            if config.output.dir.is_absolute() {
                config.output.dir.clone()
            } else {
                workspace_root.join(&config.output.dir)
            }
        });
        Self {
            workspace_root,
            config,
            output_dir,
        }
    }

    pub fn config(&self) -> &KondateConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    /// Pipeline request for a command, with CLI flags over configuration defaults.
    pub fn pipeline_request(&self, command: &Commands) -> PipelineRequest {
        let content = command.content_command();
        let args = command.args();
        let output = self.config.output.clone().with_dir(&self.output_dir);
        PipelineRequest {
            command: content,
            count: args.count.unwrap_or_else(|| content.default_count()),
            batch_size: args.batch_size.unwrap_or(self.config.generation.batch_size),
            categories: args.categories.clone(),
            output_path: output.path_for(content),
        }
    }

    /// Execute a CLI command via the single route table.
    ///
    /// The client is built first, so a missing credential fails before any generation.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let client = ProviderFactory::create_client(&self.config.provider)?;
        self.execute_with_client(command, client.as_ref())
    }

    /// Execute a command against an injected client.
    pub fn execute_with_client(
        &self,
        command: &Commands,
        client: &dyn GenerationClient,
    ) -> Result<String, ApiError> {
        let started = Instant::now();
        let request = self.pipeline_request(command);
        let settings = self.config.generation.pipeline_settings();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
        let summary = rt.block_on(run_pipeline(client, &request, &settings))?;

        info!(
            command = command_name(command),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );

        if command.args().format == "json" {
            format_summary_json(&summary)
        } else {
            Ok(format_summary_text(&summary))
        }
    }
}

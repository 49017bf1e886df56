//! CLI parse: clap types for kondate. No behavior; definitions only.

use crate::pipeline::ContentCommand;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// kondate - batch generator for bento preset documents
#[derive(Parser, Debug)]
#[command(name = "kondate")]
#[command(about = "Generate bento recipe, main-dish and side-dish preset documents in batches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ and relative output paths resolve against it)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces global and workspace config files)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the documents are written to (overrides output.dir)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Options shared by every generation command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Items per category (default: 50, side dishes 100)
    #[arg(long)]
    pub count: Option<usize>,

    /// Items requested per batch (default: generation.batch_size)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Only generate these category keys; other keys of the document are kept
    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Summary format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full bento recipes for every category (PresetRecipes.json)
    Recipes(GenerateArgs),
    /// Main dishes for every category (PresetMainDishes.json)
    MainDishes(GenerateArgs),
    /// Single-technique main dishes for the "simple" key of PresetMainDishes.json
    SimpleMainDishes(GenerateArgs),
    /// Side dishes balanced across cooking methods (PresetSideDishes.json)
    SideDishes(GenerateArgs),
}

impl Commands {
    pub fn content_command(&self) -> ContentCommand {
        match self {
            Commands::Recipes(_) => ContentCommand::Recipes,
            Commands::MainDishes(_) => ContentCommand::MainDishes,
            Commands::SimpleMainDishes(_) => ContentCommand::SimpleMainDishes,
            Commands::SideDishes(_) => ContentCommand::SideDishes,
        }
    }

    pub fn args(&self) -> &GenerateArgs {
        match self {
            Commands::Recipes(args)
            | Commands::MainDishes(args)
            | Commands::SimpleMainDishes(args)
            | Commands::SideDishes(args) => args,
        }
    }
}

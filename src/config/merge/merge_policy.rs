//! Merge rules: built-in defaults at the bottom of the layer stack.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with every scalar default applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.provider_type", "openai")?
        .set_default("provider.model", "gpt-4o")?
        .set_default("provider.api_key_env", "OPENAI_API_KEY")?
        .set_default("generation.batch_size", 5)?
        .set_default("generation.max_attempts", 3)?
        .set_default("generation.retry_backoff_ms", 3000)?
        .set_default("generation.batch_delay_ms", 1000)?
        .set_default("generation.side_dish_exclusion_window", 20)?
        .set_default("output.dir", ".")?
        .set_default("output.recipes_file", "PresetRecipes.json")?
        .set_default("output.main_dishes_file", "PresetMainDishes.json")?
        .set_default("output.side_dishes_file", "PresetSideDishes.json")
}

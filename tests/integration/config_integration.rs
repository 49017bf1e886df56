//! Integration tests for Configuration System

use super::test_utils::{with_env, with_xdg_config};
use kondate::config::{global_config_path, ConfigLoader, ProviderType};
use kondate::error::ApiError;
use kondate::provider::{GenerationClient, ProviderFactory};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_sections_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("kondate.toml");
    fs::write(
        &config_file,
        r#"
[provider]
provider_type = "local_custom"
model = "qwen2.5"
endpoint = "http://localhost:8080/v1"
api_key_env = "KONDATE_TEST_LOCAL_KEY"

[generation]
batch_size = 4
retry_backoff_ms = 500

[output]
dir = "presets"
side_dishes_file = "Sides.json"

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = with_env(&[], || ConfigLoader::load_from_file(&config_file).unwrap());
    assert!(config.validate().is_ok());
    assert_eq!(config.provider.provider_type, ProviderType::LocalCustom);
    assert_eq!(config.provider.endpoint.as_deref(), Some("http://localhost:8080/v1"));
    assert_eq!(config.generation.batch_size, 4);
    assert_eq!(config.generation.max_attempts, 3);
    assert_eq!(config.generation.retry_backoff_ms, 500);
    assert_eq!(config.output.side_dishes_file, "Sides.json");
    assert_eq!(config.output.recipes_file, "PresetRecipes.json");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_env_specific_workspace_file_and_env_override() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[generation]\nbatch_size = 8\nbatch_delay_ms = 10\n").unwrap();
    fs::write(config_dir.join("ci.toml"), "[generation]\nbatch_size = 2\n").unwrap();

    let config = with_xdg_config(
        &temp_dir,
        &[
            ("KONDATE_ENV", Some("ci")),
            ("KONDATE__PROVIDER__MODEL", Some("gpt-4o-mini")),
        ],
        || ConfigLoader::load(temp_dir.path()).unwrap(),
    );

    assert_eq!(config.generation.batch_size, 2);
    assert_eq!(config.generation.batch_delay_ms, 10);
    assert_eq!(config.provider.model, "gpt-4o-mini");
}

#[test]
fn test_global_config_file_is_layered_under_workspace() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path().join("ws");
    fs::create_dir_all(workspace.join("config")).unwrap();
    fs::write(workspace.join("config/config.toml"), "[generation]\nbatch_size = 6\n").unwrap();

    let config = with_xdg_config(&temp_dir, &[], || {
        let global = global_config_path().unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "[generation]\nbatch_size = 9\nmax_attempts = 5\n").unwrap();
        ConfigLoader::load(&workspace).unwrap()
    });

    assert_eq!(config.generation.batch_size, 6);
    assert_eq!(config.generation.max_attempts, 5);
}

#[test]
fn test_missing_credential_is_reported_before_any_client_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("kondate.toml");
    fs::write(&config_file, "[provider]\napi_key_env = \"KONDATE_TEST_ABSENT_KEY\"\n").unwrap();

    let result = with_env(&[("KONDATE_TEST_ABSENT_KEY", None)], || {
        let config = ConfigLoader::load_from_file(&config_file).unwrap();
        ProviderFactory::create_client(&config.provider)
    });
    match result {
        Err(ApiError::MissingCredential(var)) => assert_eq!(var, "KONDATE_TEST_ABSENT_KEY"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("client created without a credential"),
    }
}

#[test]
fn test_local_provider_needs_no_credential() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("kondate.toml");
    fs::write(
        &config_file,
        "[provider]\nprovider_type = \"local_custom\"\nendpoint = \"http://127.0.0.1:11434/v1\"\napi_key_env = \"KONDATE_TEST_ABSENT_LOCAL_KEY\"\n",
    )
    .unwrap();

    let client = with_env(&[("KONDATE_TEST_ABSENT_LOCAL_KEY", None)], || {
        let config = ConfigLoader::load_from_file(&config_file).unwrap();
        ProviderFactory::create_client(&config.provider)
    })
    .unwrap();
    assert_eq!(client.model_name(), "gpt-4o");
}

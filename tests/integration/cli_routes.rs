//! CLI route table: configuration, credential check and summary output

use super::test_utils::{main_dish_reply, with_env, with_xdg_config};
use clap::Parser;
use kondate::cli::{map_error, Cli, RunContext};
use kondate::error::ApiError;
use kondate::provider::ScriptedClient;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FAST_CONFIG: &str = r#"
[provider]
api_key_env = "KONDATE_TEST_CLI_KEY"

[generation]
retry_backoff_ms = 0
batch_delay_ms = 0

[output]
dir = "presets"
"#;

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("config")).unwrap();
    fs::write(temp.path().join("config/config.toml"), FAST_CONFIG).unwrap();
    temp
}

fn cli(ws: &Path, args: &[&str]) -> Cli {
    let ws = ws.to_string_lossy().to_string();
    let mut argv = vec!["kondate", "--workspace", ws.as_str()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_missing_credential_fails_before_generation() {
    let ws = workspace();
    let cli = cli(ws.path(), &["side-dishes", "--count", "3"]);

    let err = with_xdg_config(&ws, &[("KONDATE_TEST_CLI_KEY", None)], || {
        let context = RunContext::new(cli.workspace.clone(), cli.config.clone(), None).unwrap();
        context.execute(&cli.command).unwrap_err()
    });

    assert!(matches!(err, ApiError::MissingCredential(_)));
    assert!(map_error(&err).contains("KONDATE_TEST_CLI_KEY"));
    assert!(!ws.path().join("presets").exists());
}

#[test]
fn test_main_dishes_route_writes_workspace_document() {
    let ws = workspace();
    let cli = cli(
        ws.path(),
        &["main-dishes", "--count", "2", "--category", "hearty", "--format", "json"],
    );
    let client = ScriptedClient::new(vec![Ok(main_dish_reply(&["唐揚げ", "ハンバーグ"]))]);

    let output = with_xdg_config(&ws, &[], || {
        let context = RunContext::new(cli.workspace.clone(), cli.config.clone(), None).unwrap();
        context.execute_with_client(&cli.command, &client).unwrap()
    });

    let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(summary["command"], "main-dishes");
    assert_eq!(summary["keys"][0]["key"], "hearty");
    assert_eq!(summary["keys"][0]["produced"], 2);
    assert_eq!(summary["documentCounts"]["omakase"], 0);

    let written = ws.path().join("presets").join("PresetMainDishes.json");
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(doc["hearty"][1]["name"], "ハンバーグ");
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config_file = temp.path().join("bad.toml");
    fs::write(&config_file, "[generation]\nbatch_size = 0\n").unwrap();

    let result = with_env(&[], || {
        RunContext::new(temp.path().to_path_buf(), Some(config_file.clone()), None)
    });
    match result {
        Err(ApiError::ConfigError(message)) => assert!(message.contains("batch_size")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("zero batch size accepted"),
    }
}

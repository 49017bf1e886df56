//! Shared test utilities for integration tests
//!
//! Serializes environment mutation and builds canned backend replies.

use serde_json::json;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with `vars` set (`None` removes), restoring the previous values afterwards.
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(name, _)| (name.to_string(), std::env::var(name).ok()))
        .collect();

    for (name, value) in vars {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(value) => std::env::set_var(&name, value),
            None => std::env::remove_var(&name),
        }
    }
    result
}

/// Like [`with_env`], with XDG_CONFIG_HOME pointed into the temp dir so no user-level
/// config leaks into a test.
pub fn with_xdg_config<F, R>(test_dir: &TempDir, vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let config_home = test_dir.path().join("xdg");
    std::fs::create_dir_all(&config_home).unwrap();
    let config_home = config_home.to_string_lossy().to_string();
    let mut all = vec![("XDG_CONFIG_HOME", Some(config_home.as_str()))];
    all.extend_from_slice(vars);
    with_env(&all, f)
}

/// Backend reply in a ```json fence with prose around it.
pub fn fenced(payload: serde_json::Value) -> String {
    format!(
        "こちらが生成結果です。\n```json\n{}\n```\nご確認ください。",
        serde_json::to_string_pretty(&payload).unwrap()
    )
}

pub fn side_dish(name: &str, method: &str) -> serde_json::Value {
    json!({
        "name": name,
        "dish": {"name": name, "ingredients": ["ごぼう", "にんじん", "醤油"], "instructions": ["切る", "炒める"]},
        "prepTime": 10,
        "calories": 80,
        "cookingMethod": method,
        "season": null
    })
}

pub fn side_dish_reply(items: &[(&str, &str)]) -> String {
    let dishes: Vec<_> = items.iter().map(|(n, m)| side_dish(n, m)).collect();
    fenced(json!({ "sideDishes": dishes }))
}

pub fn main_dish(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": "シンプルなメインディッシュ",
        "dish": {"name": name, "ingredients": ["鮭の切り身", "塩"], "instructions": ["塩をふる", "焼く"]},
        "prepTime": 10,
        "calories": 180,
        "difficulty": "簡単",
        "season": null
    })
}

pub fn main_dish_reply(names: &[&str]) -> String {
    let dishes: Vec<_> = names.iter().map(|n| main_dish(n)).collect();
    fenced(json!({ "mainDishes": dishes }))
}

pub fn recipe(name: &str) -> serde_json::Value {
    let dish = json!({"name": "卵焼き", "ingredients": ["卵"], "instructions": ["焼く"]});
    json!({
        "name": name,
        "description": "定番のお弁当",
        "mainDish": dish,
        "sideDish1": dish,
        "sideDish2": dish,
        "prepTime": 30,
        "calories": 550,
        "difficulty": "普通",
        "tips": ["前日に下ごしらえする"]
    })
}

pub fn recipe_reply(names: &[&str]) -> String {
    let recipes: Vec<_> = names.iter().map(|n| recipe(n)).collect();
    fenced(json!({ "recipes": recipes }))
}

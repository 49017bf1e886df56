//! End-to-end pipeline runs against a scripted backend and a temp output directory

use super::test_utils::{fenced, main_dish, main_dish_reply, recipe_reply, side_dish, side_dish_reply};
use kondate::error::ApiError;
use kondate::pipeline::{run_pipeline, ContentCommand, PipelineRequest, PipelineSettings};
use kondate::provider::ScriptedClient;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

fn request(command: ContentCommand, count: usize, categories: &[&str], out: &Path) -> PipelineRequest {
    let file = match command {
        ContentCommand::Recipes => "PresetRecipes.json",
        ContentCommand::MainDishes | ContentCommand::SimpleMainDishes => "PresetMainDishes.json",
        ContentCommand::SideDishes => "PresetSideDishes.json",
    };
    PipelineRequest {
        command,
        count,
        batch_size: 5,
        categories: categories.iter().map(|c| c.to_string()).collect(),
        output_path: out.join(file),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn names(doc: &Value, key: &str) -> Vec<String> {
    doc[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

fn numbered(prefix: &str, range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("{}-{:02}", prefix, i)).collect()
}

#[tokio::test(start_paused = true)]
async fn side_dishes_twelve_in_batches_of_five() {
    let temp = TempDir::new().unwrap();
    let all = numbered("副菜", 1..=12);
    let methods = [
        "きんぴら", "きんぴら", "煮物", "煮物", "謎の調理法",
        "和え物", "和え物", "焼き物", "サラダ", "マリネ",
        "蒸し物", "漬物",
    ];
    let items: Vec<(&str, &str)> = all.iter().map(String::as_str).zip(methods).collect();
    let client = ScriptedClient::new(vec![
        Ok(side_dish_reply(&items[0..5])),
        Ok(side_dish_reply(&items[5..10])),
        Ok(side_dish_reply(&items[10..12])),
    ]);

    let req = request(ContentCommand::SideDishes, 12, &[], temp.path());
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].user.contains("5個の異なる副菜"));
    assert!(calls[1].user.contains("5個の異なる副菜"));
    assert!(calls[2].user.contains("2個の異なる副菜"));
    assert!(calls[1].user.lines().any(|l| l == "- 副菜-05"));
    assert!(calls[1].user.contains("- きんぴら: 2個"));
    assert!(calls[1].user.contains("- 煮物: 2個"));
    assert_eq!(calls[0].temperature, Some(0.9));

    assert_eq!(summary.keys[0].produced, 12);
    assert_eq!(summary.keys[0].skipped_batches, 0);
    let distribution = summary.distribution.unwrap();
    assert_eq!(distribution.total(), 11, "unknown methods are not tallied");
    assert_eq!(distribution.count("和え物"), 2);

    let doc = read_json(&req.output_path);
    assert_eq!(names(&doc, "sideDishes"), all);
    assert_eq!(doc["sideDishes"][4]["cookingMethod"], "謎の調理法");
    let raw = std::fs::read_to_string(&req.output_path).unwrap();
    assert!(raw.contains("副菜-01"));
    assert!(!raw.contains("\\u"));
}

#[tokio::test(start_paused = true)]
async fn side_dish_exclusion_window_keeps_last_twenty() {
    let temp = TempDir::new().unwrap();
    let all = numbered("副菜", 1..=30);
    let replies = all
        .chunks(5)
        .map(|chunk| {
            let items: Vec<(&str, &str)> = chunk.iter().map(|n| (n.as_str(), "炒め物")).collect();
            Ok(side_dish_reply(&items))
        })
        .collect();
    let client = ScriptedClient::new(replies);

    let req = request(ContentCommand::SideDishes, 30, &[], temp.path());
    run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    let last = &client.calls()[5].user;
    let excluded: Vec<&str> = last
        .lines()
        .filter_map(|l| l.strip_prefix("- 副菜-"))
        .collect();
    assert_eq!(excluded.len(), 20);
    assert_eq!(excluded.first(), Some(&"06"));
    assert_eq!(excluded.last(), Some(&"25"));
}

#[tokio::test(start_paused = true)]
async fn simple_main_dishes_merge_into_existing_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("PresetMainDishes.json");
    std::fs::write(
        &path,
        r#"{
  "omakase": [{"name": "a"}, {"name": "b"}, {"name": "c"}],
  "hearty": [],
  "fishMain": [],
  "simple": [{"name": "古いレシピ"}]
}"#,
    )
    .unwrap();

    let client = ScriptedClient::new(vec![Ok(main_dish_reply(&["鮭の塩焼き", "豚肉の生姜焼き"]))]);
    let req = request(ContentCommand::SimpleMainDishes, 2, &[], temp.path());
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    assert_eq!(client.calls()[0].temperature, Some(0.8));
    assert!(client.calls()[0].user.contains("「簡単弁当」"));
    assert_eq!(summary.keys.len(), 1);
    assert_eq!(summary.keys[0].key, "simple");

    let doc = read_json(&path);
    assert_eq!(names(&doc, "omakase"), vec!["a", "b", "c"]);
    assert_eq!(names(&doc, "simple"), vec!["鮭の塩焼き", "豚肉の生姜焼き"]);
    let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["omakase", "hearty", "fishMain", "simple"]);
    assert_eq!(doc["simple"][0]["difficulty"], "簡単");
    assert_eq!(doc["simple"][0]["prepTime"], 10);
}

#[tokio::test(start_paused = true)]
async fn recipes_subset_seeds_missing_document() {
    let temp = TempDir::new().unwrap();
    let client = ScriptedClient::new(vec![Ok(recipe_reply(&["鯖の味噌煮弁当", "鮭弁当"]))]);
    let req = request(ContentCommand::Recipes, 2, &["fishMain"], temp.path());
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    assert!(client.calls()[0].user.contains("カテゴリ: お魚弁当"));
    assert_eq!(
        summary.document_counts,
        vec![
            ("omakase".to_string(), 0),
            ("hearty".to_string(), 0),
            ("fishMain".to_string(), 2),
            ("simple".to_string(), 0),
        ]
    );
    let doc = read_json(&req.output_path);
    assert_eq!(doc["fishMain"][0]["mainDish"]["name"], "卵焼き");
    assert_eq!(doc["fishMain"][1]["tips"][0], "前日に下ごしらえする");
}

#[tokio::test(start_paused = true)]
async fn failing_backend_yields_empty_key_but_still_writes() {
    let temp = TempDir::new().unwrap();
    let client = ScriptedClient::always_failing("connection refused");
    let req = request(ContentCommand::Recipes, 10, &["simple"], temp.path());

    let started = Instant::now();
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // two batches, three attempts each, 3 s between attempts, 1 s after each batch
    assert_eq!(client.call_count(), 6);
    assert!(elapsed >= Duration::from_secs(14) && elapsed < Duration::from_secs(15));
    assert_eq!(summary.keys[0].produced, 0);
    assert_eq!(summary.keys[0].skipped_batches, 2);

    let doc = read_json(&req.output_path);
    assert_eq!(doc["simple"], serde_json::json!([]));
}

#[tokio::test(start_paused = true)]
async fn off_schema_items_survive_to_the_document() {
    let temp = TempDir::new().unwrap();
    let mut no_method = side_dish("ひじき煮", "煮物");
    no_method.as_object_mut().unwrap().remove("cookingMethod");
    let mut fractional = side_dish("ピーマンの塩昆布和え", "和え物");
    fractional["calories"] = serde_json::json!(45.5);
    fractional["season"] = serde_json::json!("春・秋");
    let client = ScriptedClient::new(vec![Ok(fenced(serde_json::json!({
        "sideDishes": [side_dish("きんぴらごぼう", "きんぴら"), no_method.clone(), fractional.clone()]
    })))]);

    let req = request(ContentCommand::SideDishes, 3, &[], temp.path());
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    assert_eq!(client.call_count(), 1);
    assert_eq!(summary.keys[0].produced, 3);
    let distribution = summary.distribution.unwrap();
    assert_eq!(distribution.total(), 2);
    assert_eq!(distribution.count("煮物"), 0);

    let doc = read_json(&req.output_path);
    assert_eq!(doc["sideDishes"][1], no_method);
    assert_eq!(doc["sideDishes"][2], fractional);
}

#[tokio::test(start_paused = true)]
async fn main_dish_without_name_is_kept_but_not_excluded() {
    let temp = TempDir::new().unwrap();
    let mut nameless = main_dish("x");
    nameless.as_object_mut().unwrap().remove("name");
    let client = ScriptedClient::new(vec![
        Ok(fenced(serde_json::json!({ "mainDishes": [main_dish("照り焼きチキン"), nameless] }))),
        Ok(main_dish_reply(&["唐揚げ"])),
    ]);

    let mut req = request(ContentCommand::MainDishes, 3, &["hearty"], temp.path());
    req.batch_size = 2;
    run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    let second = &client.calls()[1].user;
    assert!(second.lines().any(|l| l == "- 照り焼きチキン"));
    assert_eq!(read_json(&req.output_path)["hearty"].as_array().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn transport_error_then_valid_reply_recovers() {
    let temp = TempDir::new().unwrap();
    let client = ScriptedClient::new(vec![
        Err(ApiError::ProviderRateLimit("slow down".into())),
        Ok("申し訳ありません、JSONを生成できませんでした。".into()),
        Ok(recipe_reply(&["唐揚げ弁当", "生姜焼き弁当"])),
    ]);
    let req = request(ContentCommand::Recipes, 2, &["hearty"], temp.path());
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    assert_eq!(client.call_count(), 3);
    assert_eq!(summary.keys[0].produced, 2);
    assert_eq!(names(&read_json(&req.output_path), "hearty"), vec!["唐揚げ弁当", "生姜焼き弁当"]);
}

#[tokio::test(start_paused = true)]
async fn short_batch_is_kept_and_next_request_covers_the_gap() {
    let temp = TempDir::new().unwrap();
    let client = ScriptedClient::new(vec![
        Ok(main_dish_reply(&["照り焼きチキン", "ハンバーグ", "唐揚げ"])),
        Ok(main_dish_reply(&["生姜焼き", "肉じゃが"])),
        Ok(main_dish_reply(&["鶏の照り焼き"])),
    ]);
    let req = request(ContentCommand::MainDishes, 7, &["hearty"], temp.path());
    let summary = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap();

    // 7 items in batches of 5 plan two batches; the second asks for the remainder
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].user.contains("4個の異なるメインディッシュ"));
    assert!(calls[1].user.lines().any(|l| l == "- ハンバーグ"));
    assert_eq!(summary.keys[0].produced, 5);
    assert_eq!(summary.keys[0].requested, 7);
}

#[tokio::test(start_paused = true)]
async fn unwritable_output_is_an_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let client = ScriptedClient::new(vec![Ok(recipe_reply(&["唐揚げ弁当"]))]);
    let req = request(ContentCommand::Recipes, 1, &["hearty"], &blocker);
    let err = run_pipeline(&client, &req, &PipelineSettings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::StorageError(_)));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn invalid_requests_fail_before_any_call() {
    let temp = TempDir::new().unwrap();
    let client = ScriptedClient::new(Vec::new());

    let mut req = request(ContentCommand::Recipes, 5, &["dessert"], temp.path());
    assert!(matches!(
        run_pipeline(&client, &req, &PipelineSettings::default()).await,
        Err(ApiError::InvalidRequest(_))
    ));

    req.categories.clear();
    req.batch_size = 0;
    assert!(matches!(
        run_pipeline(&client, &req, &PipelineSettings::default()).await,
        Err(ApiError::InvalidRequest(_))
    ));
    assert_eq!(client.call_count(), 0);
    assert!(!req.output_path.exists());
}

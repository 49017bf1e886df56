//! CLI presentation: text and json formatters for the run summary.

use crate::error::{ApiError, StorageError};
use crate::pipeline::PipelineSummary;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Tables for per-key counts and, for side dishes, the cooking-method tally.
pub fn format_summary_text(summary: &PipelineSummary) -> String {
    let mut out = String::new();
    let title = format!("{} -> {}", summary.command.name(), summary.output_path.display());
    out.push_str(&format!("{}\n", title.bold().underline()));

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Key", "Name", "Produced", "Requested", "Batches", "Skipped"]);
    for key in &summary.keys {
        table.add_row(vec![
            key.key.clone(),
            key.name.clone(),
            key.produced.to_string(),
            key.requested.to_string(),
            key.batches.to_string(),
            key.skipped_batches.to_string(),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    if let Some(distribution) = &summary.distribution {
        let mut methods = Table::new();
        methods.load_preset(comfy_table::presets::UTF8_FULL);
        methods.set_header(vec!["Cooking method", "Count"]);
        for (label, count) in distribution.ranked() {
            methods.add_row(vec![label.to_string(), count.to_string()]);
        }
        out.push_str(&methods.to_string());
        out.push('\n');
    }

    let totals = format!(
        "{} of {} items generated",
        summary.total_produced(),
        summary.total_requested()
    );
    if summary.total_produced() == summary.total_requested() {
        out.push_str(&format!("{}", totals.green()));
    } else {
        out.push_str(&format!("{}", totals.yellow()));
    }
    out
}

pub fn format_summary_json(summary: &PipelineSummary) -> Result<String, ApiError> {
    let keys: Vec<serde_json::Value> = summary
        .keys
        .iter()
        .map(|k| {
            json!({
                "key": k.key,
                "name": k.name,
                "produced": k.produced,
                "requested": k.requested,
                "batches": k.batches,
                "skippedBatches": k.skipped_batches,
            })
        })
        .collect();
    let distribution = summary.distribution.as_ref().map(|d| {
        d.iter()
            .map(|(label, count)| (label.to_string(), json!(count)))
            .collect::<serde_json::Map<_, _>>()
    });
    let document: serde_json::Map<_, _> = summary
        .document_counts
        .iter()
        .map(|(key, count)| (key.clone(), json!(count)))
        .collect();
    let value = json!({
        "command": summary.command.name(),
        "outputPath": summary.output_path.display().to_string(),
        "keys": keys,
        "cookingMethods": distribution,
        "documentCounts": document,
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::StorageError(StorageError::Serialization(e.to_string())))
}

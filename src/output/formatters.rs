use anyhow::{Context, Result};

use crate::pipeline::SummaryResult;

/// Plain summary text
pub fn format_as_text(result: &SummaryResult) -> String {
    result.summary.trim_end().to_string()
}

/// Pretty-printed JSON including metadata
pub fn format_as_json(result: &SummaryResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize summary")
}

/// Markdown document with a small metadata header
pub fn format_as_markdown(result: &SummaryResult) -> String {
    let mut md = String::new();

    md.push_str("# Summary of ");
    md.push_str(result.video_id.as_str());
    md.push_str("\n\n");

    md.push_str("- Video: ");
    md.push_str(&result.video_id.watch_url());
    md.push('\n');
    if let Some(focus) = &result.focus_points {
        md.push_str("- Focus: ");
        md.push_str(focus);
        md.push('\n');
    }
    md.push_str("- Model: ");
    md.push_str(&result.model);
    md.push('\n');
    md.push_str("- Generated: ");
    md.push_str(&result.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    md.push_str("\n\n");

    md.push_str(result.summary.trim_end());
    md.push('\n');
    md
}

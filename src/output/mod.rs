use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::pipeline::SummaryResult;

pub mod formatters;

pub use formatters::*;

/// Render a summary in the requested format
pub fn render(result: &SummaryResult, format: OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Text => format_as_text(result),
        OutputFormat::Json => format_as_json(result)?,
        OutputFormat::Markdown => format_as_markdown(result),
    };

    Ok(content)
}

/// Save summary to file
pub async fn save_to_file(result: &SummaryResult, path: &Path, format: OutputFormat) -> Result<()> {
    let content = render(result, format)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print summary to console
pub fn print_to_console(result: &SummaryResult, format: OutputFormat) -> Result<()> {
    let content = render(result, format)?;
    println!("{}", content);
    Ok(())
}

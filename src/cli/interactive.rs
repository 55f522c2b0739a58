use anyhow::Result;
use console::{style, Term};

use super::progress::spawn_progress;
use crate::output::format_as_text;
use crate::pipeline::{RequestState, SubmissionInput, SummaryPipeline};
use crate::summarize::Summarizer;
use crate::transcript::TranscriptSource;

/// Terminal rendition of the submission form.
///
/// Each round reads a URL and optional focus points, shows the spinner while
/// the request runs, then the summary or error, and goes back to an empty
/// form on Enter. An empty URL ends the session.
pub async fn run_interactive<T, S>(
    pipeline: &SummaryPipeline<T, S>,
    api_key: Option<String>,
    quiet: bool,
) -> Result<()>
where
    T: TranscriptSource,
    S: Summarizer,
{
    let term = Term::stdout();
    term.write_line(&format!(
        "{} (captions: {})",
        style("yt-digest").bold(),
        pipeline.language()
    ))?;

    let credential = match api_key {
        Some(key) => key,
        None => {
            term.write_str("Gemini API key: ")?;
            term.read_secure_line()?
        }
    };

    loop {
        let url = prompt(&term, "Video URL (empty to quit): ")?;
        if url.trim().is_empty() {
            break;
        }
        let focus = prompt(&term, "Focus points (optional): ")?;
        let focus_points = (!focus.trim().is_empty()).then_some(focus);

        let progress = spawn_progress(pipeline.subscribe(), quiet);
        pipeline
            .submit(SubmissionInput::new(url, credential.clone(), focus_points))
            .await;
        if let Err(e) = progress.await {
            tracing::debug!("Progress indicator task failed: {}", e);
        }

        match pipeline.state() {
            RequestState::Succeeded(result) => {
                term.write_line("")?;
                term.write_line(&format_as_text(&result))?;
                term.write_line("")?;
            }
            RequestState::Failed(err) => {
                let label = style("Error:").red().bold();
                term.write_line(&format!("{} {}", label, err.user_message()))?;
            }
            RequestState::Idle | RequestState::InFlight => {}
        }

        prompt(&term, &format!("{}", style("Press Enter to go back").dim()))?;
        pipeline.reset();
        term.write_line("")?;
    }

    Ok(())
}

fn prompt(term: &Term, label: &str) -> Result<String> {
    term.write_str(label)?;
    Ok(term.read_line()?)
}

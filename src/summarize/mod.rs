use async_trait::async_trait;

pub mod gemini;

pub use gemini::{GeminiSummarizer, GEMINI_MODEL};

use crate::DigestError;

const SUMMARY_INSTRUCTION: &str =
    "以下はYouTube動画の文字起こしです。内容を日本語で分かりやすく要約してください。";
const FOCUS_LABEL: &str = "特に次の点に焦点を当ててください:";
const TRANSCRIPT_LABEL: &str = "文字起こし:";

/// Client for the generative-text service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `transcript`, optionally emphasizing `focus_points`.
    ///
    /// `credential` authorizes this call only. Every failure is reported as
    /// [`DigestError::Summarization`].
    async fn summarize<'a>(
        &self,
        transcript: &str,
        focus_points: Option<&'a str>,
        credential: &str,
    ) -> Result<String, DigestError>;

    /// Identifier of the model producing the summary
    fn model(&self) -> &'static str;
}

/// Build the prompt sent to the model
pub fn build_prompt(transcript: &str, focus_points: Option<&str>) -> String {
    let mut prompt = String::from(SUMMARY_INSTRUCTION);
    prompt.push('\n');

    if let Some(focus) = focus_points.map(str::trim).filter(|focus| !focus.is_empty()) {
        prompt.push_str(FOCUS_LABEL);
        prompt.push(' ');
        prompt.push_str(focus);
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(TRANSCRIPT_LABEL);
    prompt.push('\n');
    prompt.push_str(transcript);
    prompt
}

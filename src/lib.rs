//! yt-digest - fetch a YouTube transcript and summarize it with Gemini
//!
//! The library is a short pipeline: extract the video identifier from a URL,
//! fetch the captions in the configured language, join them into one text and
//! hand that text to the generative-text service. [`SummaryPipeline`] runs the
//! stages for one submission at a time and publishes its [`RequestState`].

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod pipeline;
pub mod summarize;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{extract_video_id, VideoId};
pub use pipeline::{RequestState, SubmissionInput, SummaryPipeline, SummaryResult};
pub use summarize::{GeminiSummarizer, Summarizer};
pub use transcript::{assemble, CaptionFragment, TranscriptSource, YoutubeTranscriptSource};

/// Result type used by the binary and the configuration layer
pub type Result<T> = anyhow::Result<T>;

/// Shown for failures whose detail is only written to the log
const GENERIC_SUMMARY_FAILURE: &str =
    "要約の生成に失敗しました。APIキーを確認して、もう一度お試しください。";
const GENERIC_UNEXPECTED_FAILURE: &str =
    "予期しないエラーが発生しました。もう一度お試しください。";

/// Failure of one pipeline stage
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    #[error("invalid URL")]
    InvalidUrl,

    #[error("No transcript available for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Summarization failed")]
    Summarization,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl DigestError {
    /// Message suitable for the presentation layer
    pub fn user_message(&self) -> String {
        match self {
            DigestError::Summarization => GENERIC_SUMMARY_FAILURE.to_string(),
            DigestError::Unexpected(_) => GENERIC_UNEXPECTED_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_message_is_verbatim() {
        assert_eq!(DigestError::InvalidUrl.user_message(), "invalid URL");
    }

    #[test]
    fn transcript_errors_keep_the_underlying_reason() {
        let err = DigestError::TranscriptUnavailable {
            video_id: "dQw4w9WgXcQ".to_string(),
            reason: "no captions in ja".to_string(),
        };
        let message = err.user_message();
        assert!(message.contains("dQw4w9WgXcQ"));
        assert!(message.contains("no captions in ja"));

        let err = DigestError::Network("connection reset".to_string());
        assert!(err.user_message().contains("connection reset"));
    }

    #[test]
    fn opaque_failures_hide_their_detail() {
        assert_eq!(DigestError::Summarization.user_message(), GENERIC_SUMMARY_FAILURE);

        let err = DigestError::Unexpected("task panicked at src/foo.rs".to_string());
        assert_eq!(err.user_message(), GENERIC_UNEXPECTED_FAILURE);
        assert!(!err.user_message().contains("src/foo.rs"));
    }
}

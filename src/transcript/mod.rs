use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::extractors::VideoId;
use crate::DigestError;

/// One timed unit of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    /// Caption text as delivered by the source
    pub text: String,

    /// Start offset in seconds
    pub start: f64,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>, start: f64) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }
}

/// Source of caption fragments for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the captions of `video_id` in `language`, in spoken order.
    ///
    /// Fails with [`DigestError::TranscriptUnavailable`] when the video has no
    /// captions in that language and with [`DigestError::Network`] when the
    /// source cannot be reached.
    async fn fetch_transcript(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<CaptionFragment>, DigestError>;
}

/// Join fragment texts in order, separated by a single space
pub fn assemble(fragments: &[CaptionFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Start offset of the last fragment, used for progress reporting
pub fn spoken_span(fragments: &[CaptionFragment]) -> f64 {
    fragments.last().map(|fragment| fragment.start).unwrap_or(0.0)
}

use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use super::{CaptionFragment, TranscriptSource};
use crate::extractors::VideoId;
use crate::DigestError;

/// Caption source backed by YouTube's timed-text endpoints
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
    preserve_formatting: bool,
}

impl YoutubeTranscriptSource {
    pub fn new(preserve_formatting: bool) -> Result<Self, DigestError> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            DigestError::Unexpected(format!("Failed to create transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            preserve_formatting,
        })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    async fn fetch_transcript(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<CaptionFragment>, DigestError> {
        tracing::debug!("Fetching '{}' captions for video {}", language, video_id);

        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &[language], self.preserve_formatting)
            .await
            .map_err(|e| classify_failure(video_id, &e))?;

        let fragments: Vec<CaptionFragment> = transcript
            .snippets
            .into_iter()
            .map(|snippet| CaptionFragment::new(snippet.text, snippet.start))
            .collect();

        tracing::debug!("Received {} caption fragments", fragments.len());
        Ok(fragments)
    }
}

/// Requests that failed or were refused by YouTube surface as network errors.
/// Anything else means the captions are not there for this video and language.
fn classify_failure(video_id: &VideoId, error: &CouldNotRetrieveTranscript) -> DigestError {
    use CouldNotRetrieveTranscriptReason::{IpBlocked, RequestBlocked, YouTubeRequestFailed};

    match &error.reason {
        Some(YouTubeRequestFailed(_) | IpBlocked(_) | RequestBlocked(_)) => {
            DigestError::Network(error.to_string())
        }
        _ => DigestError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason: error.to_string(),
        },
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extractors::VideoId;
use crate::DigestError;

/// What the user submitted for one request
#[derive(Clone, PartialEq, Eq)]
pub struct SubmissionInput {
    pub url: String,
    pub credential: String,
    pub focus_points: Option<String>,
}

impl SubmissionInput {
    pub fn new(
        url: impl Into<String>,
        credential: impl Into<String>,
        focus_points: Option<String>,
    ) -> Self {
        Self {
            url: url.into(),
            credential: credential.into(),
            focus_points,
        }
    }
}

impl fmt::Debug for SubmissionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionInput")
            .field("url", &self.url)
            .field("credential", &"<redacted>")
            .field("focus_points", &self.focus_points)
            .finish()
    }
}

/// Generated summary together with what produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub video_id: VideoId,
    pub summary: String,
    pub focus_points: Option<String>,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

/// Lifecycle of the current request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(SummaryResult),
    Failed(DigestError),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// True once the request has either succeeded or failed
    pub fn is_settled(&self) -> bool {
        matches!(self, RequestState::Succeeded(_) | RequestState::Failed(_))
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Message to show for a failed request
    pub fn error_message(&self) -> Option<String> {
        match self {
            RequestState::Failed(err) => Some(err.user_message()),
            _ => None,
        }
    }
}

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

pub mod state;

pub use state::{RequestState, SubmissionInput, SummaryResult};

use crate::extractors::extract_video_id;
use crate::summarize::Summarizer;
use crate::transcript::{assemble, spoken_span, TranscriptSource};
use crate::utils::format_duration;
use crate::DigestError;

/// Runs submissions through extraction, transcript fetch, assembly and
/// summarization, and owns the resulting [`RequestState`].
///
/// Every submission takes a new generation number. A stage that completes
/// after its generation has been superseded, by a newer submission or by
/// [`reset`](Self::reset), is discarded without touching the state.
pub struct SummaryPipeline<T, S> {
    source: T,
    summarizer: S,
    language: String,
    state: watch::Sender<RequestState>,
    generation: AtomicU64,
}

impl<T, S> SummaryPipeline<T, S>
where
    T: TranscriptSource,
    S: Summarizer,
{
    /// Create a new pipeline fetching captions in `language`
    pub fn new(source: T, summarizer: S, language: impl Into<String>) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);

        Self {
            source,
            summarizer,
            language: language.into(),
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    /// Receive every state transition from now on
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Return to `Idle`, dropping any result, error or in-flight request
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = RequestState::Idle;
        });
        tracing::debug!("Request state reset");
    }

    /// Run one submission to completion.
    ///
    /// Returns the state this submission settled in, or `None` when it was
    /// superseded before it could settle.
    pub async fn submit(&self, input: SubmissionInput) -> Option<RequestState> {
        let generation = self.begin();

        let outcome = match self.run(generation, &input).await {
            Some(outcome) => outcome,
            None => {
                tracing::debug!("Submission #{} superseded, result discarded", generation);
                return None;
            }
        };

        let settled = match outcome {
            Ok(result) => {
                tracing::info!("Summary ready for video {}", result.video_id);
                RequestState::Succeeded(result)
            }
            Err(err) => {
                tracing::info!("Submission #{} failed: {}", generation, err);
                RequestState::Failed(err)
            }
        };

        if self.publish(generation, settled.clone()) {
            Some(settled)
        } else {
            tracing::debug!("Submission #{} superseded, result discarded", generation);
            None
        }
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = RequestState::InFlight;
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Write `next` only if `generation` is still the latest submission
    fn publish(&self, generation: u64, next: RequestState) -> bool {
        self.state.send_if_modified(|state| {
            if self.is_current(generation) {
                *state = next;
                true
            } else {
                false
            }
        })
    }

    async fn run(
        &self,
        generation: u64,
        input: &SubmissionInput,
    ) -> Option<Result<SummaryResult, DigestError>> {
        let Some(video_id) = extract_video_id(&input.url) else {
            return Some(Err(DigestError::InvalidUrl));
        };

        tracing::info!("Fetching '{}' transcript for video {}", self.language, video_id);
        let fetched = self.source.fetch_transcript(&video_id, &self.language).await;
        if !self.is_current(generation) {
            return None;
        }
        let fragments = match fetched {
            Ok(fragments) => fragments,
            Err(err) => return Some(Err(err)),
        };

        let transcript = assemble(&fragments);
        tracing::info!(
            "Assembled {} fragments ({} characters, {} of speech)",
            fragments.len(),
            transcript.chars().count(),
            format_duration(spoken_span(&fragments))
        );

        let focus_points = input
            .focus_points
            .as_deref()
            .map(str::trim)
            .filter(|focus| !focus.is_empty());

        let summarized = self
            .summarizer
            .summarize(&transcript, focus_points, &input.credential)
            .await;
        if !self.is_current(generation) {
            return None;
        }

        Some(summarized.map(|summary| SummaryResult {
            video_id,
            summary,
            focus_points: focus_points.map(str::to_string),
            model: self.summarizer.model().to_string(),
            generated_at: Utc::now(),
        }))
    }
}

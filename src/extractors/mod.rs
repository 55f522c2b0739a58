use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Length of every YouTube video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// Recognized URL shapes. Group 1 is the candidate identifier segment, cut at
/// the next `#`, `&` or `?`.
static VIDEO_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(?:youtu\.be/|v/|/u/\w/|embed/|watch\?)\??v?=?([^#&?]*).*")
        .expect("video URL pattern is valid")
});

/// Canonical identifier of a YouTube video
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from a YouTube URL.
///
/// Supported shapes are `youtu.be/<id>`, `.../v/<id>`, `.../u/<x>/<id>`,
/// `.../embed/<id>` and `.../watch?v=<id>`. The segment after the shape, up
/// to the next `#`, `&` or `?`, must be exactly eleven characters. The input
/// is not normalized, so surrounding whitespace rejects it.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    if url.trim() != url {
        return None;
    }

    let captures = VIDEO_URL_PATTERN.captures(url)?;
    let segment = captures.get(1)?.as_str();

    if segment.chars().count() == VIDEO_ID_LEN {
        Some(VideoId(segment.to_string()))
    } else {
        None
    }
}

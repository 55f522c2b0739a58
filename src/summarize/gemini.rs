use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{build_prompt, Summarizer};
use crate::DigestError;

/// Model used for every summary
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Summarizer backed by the Gemini `generateContent` API
pub struct GeminiSummarizer {
    client: Client,
    endpoint: String,
}

impl GeminiSummarizer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn session<'a>(&'a self, credential: &'a str) -> GeminiSession<'a> {
        GeminiSession {
            client: &self.client,
            url: format!("{}/models/{}:generateContent", self.endpoint, GEMINI_MODEL),
            api_key: credential,
        }
    }
}

/// Authorized handle for a single request
struct GeminiSession<'a> {
    client: &'a Client,
    url: String,
    api_key: &'a str,
}

impl GeminiSession<'_> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini returned HTTP {}: {}", status, detail);
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        extract_text(parsed)
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize<'a>(
        &self,
        transcript: &str,
        focus_points: Option<&'a str>,
        credential: &str,
    ) -> std::result::Result<String, DigestError> {
        if credential.trim().is_empty() {
            tracing::warn!("Summarization skipped: empty API key");
            return Err(DigestError::Summarization);
        }

        let prompt = build_prompt(transcript, focus_points);
        tracing::debug!(
            "Sending {} prompt characters to {}",
            prompt.chars().count(),
            GEMINI_MODEL
        );

        self.session(credential)
            .generate(&prompt)
            .await
            .map_err(|cause| {
                tracing::warn!("Gemini call failed: {:#}", cause);
                DigestError::Summarization
            })
    }

    fn model(&self) -> &'static str {
        GEMINI_MODEL
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Result<String> {
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .context("Gemini response has no candidates")?;

    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.is_empty() {
        anyhow::bail!("Gemini response has no text");
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String> {
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        extract_text(response)
    }

    #[test]
    fn test_extract_single_part() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"要約です"}],"role":"model"},"finishReason":"STOP"}]}"#;
        assert_eq!(parse(json).unwrap(), "要約です");
    }

    #[test]
    fn test_extract_joins_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"前半"},{"text":"後半"}]}}]}"#;
        assert_eq!(parse(json).unwrap(), "前半後半");
    }

    #[test]
    fn test_extract_rejects_blocked_responses() {
        let err = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Gemini response has no candidates");
        assert!(parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).is_err());
        let err = parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap_err();
        assert_eq!(format!("{:#}", err), "Gemini response has no text");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
    }

    #[test]
    fn test_session_url_uses_fixed_model() {
        let summarizer = GeminiSummarizer::new("https://example.test/v1beta/");
        let session = summarizer.session("key");
        assert_eq!(
            session.url,
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(summarizer.model(), GEMINI_MODEL);
    }

    #[tokio::test]
    async fn test_empty_credential_fails_without_a_request() {
        let summarizer = GeminiSummarizer::new("http://127.0.0.1:9");
        let result = summarizer.summarize("text", None, "  ").await;
        assert_eq!(result, Err(DigestError::Summarization));
    }
}

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::errors::ForgeError;
use crate::wire::ApiErrorBody;

/// Primary backend. Single POST to the generateContent endpoint with the
/// prompt in the nested contents/parts body and fixed generation
/// parameters.
pub struct GeminiProvider {
    endpoint: String,
    temperature: f32,
    max_output_tokens: u32,
    client: Client,
}

impl GeminiProvider {
    pub fn new(cfg: &Config) -> Self {
        Self {
            endpoint: cfg.gemini_endpoint.clone(),
            temperature: cfg.temperature,
            max_output_tokens: cfg.max_output_tokens,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl super::Provider for GeminiProvider {
    async fn send(&self, prompt: &str, debug: bool) -> Result<String> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ForgeError::Config("GEMINI_API_KEY env var is not set".into()))?;

        let body = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens
            }
        });

        if debug {
            eprintln!("debug[gemini]: HTTP POST {}", self.endpoint);
        }

        let resp = self
            .client
            .post(format!("{}?key={}", self.endpoint, api_key))
            .json(&body)
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("gemini read body failed")?;

        if debug {
            eprintln!("debug[gemini]: raw status: {}", status);
            eprintln!("debug[gemini]: raw response:\n{}", &text);
        }

        if !status.is_success() {
            return Err(anyhow!("Gemini API error ({}): {}", status, error_message(&text, status)));
        }

        extract_text(&text)
    }
}

/// Best-effort message from a failed response body, falling back to the
/// HTTP status text.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

/// Pull the generated text out of `candidates[0].content.parts[0].text`.
pub fn extract_text(body: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct GenerateResponse {
        candidates: Vec<Candidate>,
    }
    #[derive(Deserialize)]
    struct Candidate {
        content: CandidateContent,
    }
    #[derive(Deserialize)]
    struct CandidateContent {
        parts: Vec<Part>,
    }
    #[derive(Deserialize)]
    struct Part {
        text: String,
    }

    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("unexpected Gemini response structure: {e}"))?;

    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| anyhow!("Gemini response contained no generated text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_success_body() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"X"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "X");
    }

    #[test]
    fn empty_candidates_is_an_error() {
        assert!(extract_text(r#"{"candidates":[]}"#).is_err());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(extract_text("not json").is_err());
    }

    #[test]
    fn error_message_prefers_api_body() {
        let body = r#"{"error":{"message":"quota exceeded"}}"#;
        let msg = error_message(body, reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(msg, "quota exceeded");
    }

    #[test]
    fn error_message_falls_back_to_status_text() {
        let msg = error_message("<html>", reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "Bad Gateway");
    }
}

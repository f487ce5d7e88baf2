use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::ForgeError;
use crate::wire::ApiErrorBody;

const XAI_ENDPOINT: &str = "https://api.x.ai/v1/chat/completions";
const XAI_MODEL: &str = "grok-beta";

const SYSTEM_PROMPT: &str =
    "You are a developer tooling assistant. Produce exactly the requested file or text, \
     with no commentary before or after it.";

/// Secondary backend: chat-completions call with a system turn plus the
/// user prompt.
pub struct XaiProvider {
    temperature: f32,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<Msg<'a>>,
    model: &'a str,
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

impl XaiProvider {
    pub fn new(cfg: &Config) -> Self {
        Self {
            temperature: cfg.temperature,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl super::Provider for XaiProvider {
    async fn send(&self, prompt: &str, debug: bool) -> Result<String> {
        let api_key = std::env::var("XAI_API_KEY")
            .map_err(|_| ForgeError::Config("XAI_API_KEY env var is not set".into()))?;

        let body = ChatRequest {
            messages: vec![
                Msg { role: "system", content: SYSTEM_PROMPT },
                Msg { role: "user", content: prompt },
            ],
            model: XAI_MODEL,
            temperature: self.temperature,
        };

        if debug {
            eprintln!("debug[xai]: HTTP POST {}", XAI_ENDPOINT);
        }

        let resp = self
            .client
            .post(XAI_ENDPOINT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("xai request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("xai read body failed")?;

        if debug {
            eprintln!("debug[xai]: raw status: {}", status);
            eprintln!("debug[xai]: raw response:\n{}", &text);
        }

        if !status.is_success() {
            let msg = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(parsed) => parsed.error.message,
                Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            return Err(anyhow!("xAI API error ({}): {}", status, msg));
        }

        extract_text(&text)
    }
}

/// Pull the generated text out of `choices[0].message.content`.
pub fn extract_text(body: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct ChatResponse {
        choices: Vec<Choice>,
    }
    #[derive(Deserialize)]
    struct Choice {
        message: ChatMessage,
    }
    #[derive(Deserialize)]
    struct ChatMessage {
        content: String,
    }

    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("unexpected xAI response structure: {e}"))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| anyhow!("xAI response contained no choices"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_success_body() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"X"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "X");
    }

    #[test]
    fn empty_choices_is_an_error() {
        assert!(extract_text(r#"{"choices":[]}"#).is_err());
    }
}

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cli::ModelKind;
use crate::config::Config;
use crate::wire::AiResponse;

pub mod gemini;
pub mod xai;

/// One external generative backend: prompt in, raw generated text out.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn send(&self, prompt: &str, debug: bool) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(kind: ModelKind, cfg: &Config) -> DynProvider {
    match kind {
        ModelKind::Gemini => Box::new(gemini::GeminiProvider::new(cfg)),
        ModelKind::Xai => Box::new(xai::XaiProvider::new(cfg)),
    }
}

/// Gateway entry point. Never returns `Err`: missing credentials, non-2xx
/// statuses, malformed bodies, and transport failures are logged to stderr
/// and folded into the normalized response. No retry.
pub async fn generate(prompt: &str, kind: ModelKind, cfg: &Config, debug: bool) -> AiResponse {
    let provider = make_provider(kind, cfg);
    normalize(kind, provider.send(prompt, debug).await)
}

fn normalize(kind: ModelKind, result: Result<String>) -> AiResponse {
    match result {
        Ok(text) => AiResponse::ok(strip_code_fence(&text)),
        Err(e) => {
            eprintln!("devforge: generation via {kind:?} failed: {e:#}");
            AiResponse::failed(format!("{e:#}"))
        }
    }
}

/// Remove the code-fence wrapper a model sometimes puts around its whole
/// answer: a leading ```markdown (or bare ```) line at the very start and
/// a trailing ``` at the very end. Inline fences are left alone.
pub fn strip_code_fence(text: &str) -> &str {
    let mut out = text;
    if let Some(rest) = out.strip_prefix("```markdown\n").or_else(|| out.strip_prefix("```\n")) {
        out = rest;
    }
    if let Some(rest) = out.strip_suffix("\n```").or_else(|| out.strip_suffix("\n```\n")) {
        out = rest;
    }
    out
}

/// Issues a monotone ticket per generation and surfaces a completion only
/// while its ticket is still the newest, so a slow response that resolves
/// after a newer request started is dropped instead of clobbering it.
#[derive(Default)]
pub struct Dispatcher {
    latest: AtomicU64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// `None` means the result arrived stale and was discarded.
    pub async fn dispatch(
        &self,
        prompt: &str,
        kind: ModelKind,
        cfg: &Config,
        debug: bool,
    ) -> Option<AiResponse> {
        let ticket = self.issue();
        let resp = generate(prompt, kind, cfg, debug).await;
        if self.is_current(ticket) {
            Some(resp)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markdown_wrap() {
        assert_eq!(strip_code_fence("```markdown\nHELLO\n```"), "HELLO");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence("HELLO"), "HELLO");
    }

    #[test]
    fn ignores_inline_fences() {
        let text = "intro\n```bash\nnpm install\n```\noutro";
        assert_eq!(strip_code_fence(text), text);
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = strip_code_fence("```markdown\nHELLO\n```");
        assert_eq!(strip_code_fence(once), once);
    }

    #[test]
    fn success_is_fence_stripped_with_no_error() {
        let resp = normalize(ModelKind::Gemini, Ok("```markdown\nX\n```".into()));
        assert_eq!(resp, AiResponse::ok("X"));
    }

    #[test]
    fn failure_folds_into_empty_content_and_message() {
        let resp = normalize(
            ModelKind::Xai,
            Err(anyhow::anyhow!("xAI API error (500 Internal Server Error): boom")),
        );
        assert!(resp.content.is_empty());
        assert!(resp.error.as_deref().unwrap().contains("500"));
    }

    #[test]
    fn stale_ticket_is_rejected() {
        let d = Dispatcher::new();
        let first = d.issue();
        let second = d.issue();
        assert!(!d.is_current(first));
        assert!(d.is_current(second));
    }
}

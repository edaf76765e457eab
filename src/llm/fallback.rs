//! Fallback client: wraps any [`CompletionClient`] and turns failures into
//! placeholder text.
//!
//! A failed stage must not halt a lecture: [`FallbackClient::complete`]
//! returns `[ERROR: Could not <action>: <error>]` instead of an error, and
//! that diagnostic flows downstream as ordinary content.  Every substitution
//! is logged at `warn`.

use std::sync::Arc;

use crate::llm::client::{CompletionClient, LlmError};

/// Prefix shared by every placeholder produced here.
pub const PLACEHOLDER_PREFIX: &str = "[ERROR: Could not ";

/// Format the diagnostic text that stands in for a failed completion.
///
/// ```
/// use lecture_writer::llm::{placeholder, LlmError};
///
/// let text = placeholder("summarize previous lecture", &LlmError::Timeout);
/// assert_eq!(
///     text,
///     "[ERROR: Could not summarize previous lecture: completion request timed out]"
/// );
/// ```
pub fn placeholder(action: &str, err: &LlmError) -> String {
    format!("{PLACEHOLDER_PREFIX}{action}: {err}]")
}

/// Returns `true` when `text` is a placeholder produced by [`placeholder`].
pub fn is_placeholder(text: &str) -> bool {
    text.starts_with(PLACEHOLDER_PREFIX)
}

// ---------------------------------------------------------------------------
// FallbackClient
// ---------------------------------------------------------------------------

/// Cheap-to-clone handle that never fails.
#[derive(Clone)]
pub struct FallbackClient {
    inner: Arc<dyn CompletionClient>,
}

impl FallbackClient {
    /// Wrap `inner` with placeholder behaviour.
    pub fn new(inner: Arc<dyn CompletionClient>) -> Self {
        Self { inner }
    }

    /// Attempt the completion exactly once.
    ///
    /// `action` completes the sentence "Could not …" in the placeholder,
    /// e.g. `"extract main points for 'Intro to Rust'"`.
    pub async fn complete(&self, prompt: &str, temperature: f32, action: &str) -> String {
        match self.inner.complete(prompt, temperature).await {
            Ok(text) => text,
            Err(err) => {
                log::warn!("completion failed, substituting placeholder: could not {action}: {err}");
                placeholder(action, &err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct AlwaysOk(String);

    #[async_trait]
    impl CompletionClient for AlwaysOk {
        async fn complete(&self, _prompt: &str, _temperature: f32) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct AlwaysFails(LlmErrorKind);

    enum LlmErrorKind {
        Request,
        Timeout,
        Status,
        Empty,
    }

    #[async_trait]
    impl CompletionClient for AlwaysFails {
        async fn complete(&self, _prompt: &str, _temperature: f32) -> Result<String, LlmError> {
            let err = match self.0 {
                LlmErrorKind::Request => LlmError::Request("connection refused".into()),
                LlmErrorKind::Timeout => LlmError::Timeout,
                LlmErrorKind::Status => LlmError::Status {
                    status: 429,
                    body: "rate limited".into(),
                },
                LlmErrorKind::Empty => LlmError::EmptyResponse,
            };
            Err(err)
        }
    }

    fn wrap(client: impl CompletionClient + 'static) -> FallbackClient {
        FallbackClient::new(Arc::new(client))
    }

    #[tokio::test]
    async fn passes_through_success() {
        let llm = wrap(AlwaysOk("- Concept: ownership".into()));
        let text = llm.complete("prompt", 0.3, "extract main points").await;
        assert_eq!(text, "- Concept: ownership");
        assert!(!is_placeholder(&text));
    }

    #[tokio::test]
    async fn request_error_becomes_placeholder() {
        let llm = wrap(AlwaysFails(LlmErrorKind::Request));
        let text = llm
            .complete("prompt", 0.3, "extract main points for 'Borrowing'")
            .await;
        assert_eq!(
            text,
            "[ERROR: Could not extract main points for 'Borrowing': HTTP request failed: connection refused]"
        );
        assert!(is_placeholder(&text));
    }

    #[tokio::test]
    async fn timeout_becomes_placeholder() {
        let llm = wrap(AlwaysFails(LlmErrorKind::Timeout));
        let text = llm.complete("prompt", 0.7, "generate lecture").await;
        assert!(text.contains("timed out"));
        assert!(is_placeholder(&text));
    }

    #[tokio::test]
    async fn status_error_becomes_placeholder() {
        let llm = wrap(AlwaysFails(LlmErrorKind::Status));
        let text = llm.complete("prompt", 0.7, "mimic style").await;
        assert!(text.contains("429"));
        assert!(text.ends_with(']'));
    }

    #[tokio::test]
    async fn empty_response_becomes_placeholder() {
        let llm = wrap(AlwaysFails(LlmErrorKind::Empty));
        let text = llm.complete("prompt", 0.3, "fact-check lecture").await;
        assert_eq!(
            text,
            "[ERROR: Could not fact-check lecture: completion response was empty]"
        );
    }
}

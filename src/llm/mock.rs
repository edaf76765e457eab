//! Scripted [`CompletionClient`] for unit tests.
//!
//! By default it echoes the prompt back, so whatever a stage received shows
//! up in the next stage's input.  Needles select failures or canned replies.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::client::{CompletionClient, LlmError};

#[derive(Default)]
pub(crate) struct ScriptedClient {
    prompts: Mutex<Vec<String>>,
    failures: Vec<String>,
    replies: Vec<(String, String)>,
}

impl ScriptedClient {
    pub(crate) fn echo() -> Self {
        Self::default()
    }

    /// Fail every prompt containing `needle`.
    pub(crate) fn failing_on(mut self, needle: &str) -> Self {
        self.failures.push(needle.to_string());
        self
    }

    /// Answer every prompt containing `needle` with `reply`.
    pub(crate) fn replying(mut self, needle: &str, reply: &str) -> Self {
        self.replies.push((needle.to_string(), reply.to_string()));
        self
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Prompts that start with `prefix` (i.e. were built for that role) and
    /// contain every needle.
    pub(crate) fn prompts_for(&self, prefix: &str, needles: &[&str]) -> Vec<String> {
        self.prompts()
            .into_iter()
            .filter(|p| p.starts_with(prefix) && needles.iter().all(|n| p.contains(n)))
            .collect()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str, _temperature: f32) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self.failures.iter().any(|n| prompt.contains(n.as_str())) {
            return Err(LlmError::Request("connection refused".into()));
        }
        if let Some((_, reply)) = self.replies.iter().find(|(n, _)| prompt.contains(n.as_str())) {
            return Ok(reply.clone());
        }
        Ok(prompt.trim().to_string())
    }
}

//! LLM access for the script generators.
//!
//! This module provides:
//! * [`CompletionClient`]: async trait implemented by all completion backends.
//! * [`ApiClient`]: OpenAI-compatible chat-completions client.
//! * [`FallbackClient`]: wraps any client; turns failures into placeholder text.
//! * [`parse_correction`] / [`CorrectionResult`]: fact-check response parsing.
//! * [`LlmError`]: error variants for completion calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lecture_writer::config::AppConfig;
//! use lecture_writer::llm::{ApiClient, FallbackClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let api_key = config.resolve_api_key().unwrap();
//!
//!     // A client that never fails (failures become placeholder text).
//!     let llm = FallbackClient::new(Arc::new(ApiClient::from_config(&config.llm, api_key)));
//!
//!     let text = llm.complete("Say hello to the class.", 0.7, "greet the class").await;
//!     println!("{text}");
//! }
//! ```

pub mod client;
pub mod fact_check;
pub mod fallback;

#[cfg(test)]
pub(crate) mod mock;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiClient, CompletionClient, LlmError};
pub use fact_check::{parse_correction, CorrectionResult};
pub use fallback::{is_placeholder, placeholder, FallbackClient, PLACEHOLDER_PREFIX};

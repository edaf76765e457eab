//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings) with sub-configs for the LLM
//! endpoint, inputs, output tree and fan-out limits, `AppPaths` for the
//! platform config directory, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, GenerationConfig, InputConfig, LlmConfig, OpenAiSecrets, OutputConfig, Secrets,
    API_KEY_ENV,
};

//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the
//! orchestrators by value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable consulted last when resolving the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the API endpoint (`/v1/chat/completions` is appended).
    ///
    /// - OpenAI: `https://api.openai.com`
    /// - Ollama (OpenAI mode): `http://localhost:11434`
    pub base_url: String,
    /// API key. When absent, the secrets file and `OPENAI_API_KEY` are tried.
    pub api_key: Option<String>,
    /// Model identifier sent with every request (e.g. `"gpt-4.1"`).
    pub model: String,
    /// Maximum seconds to wait for a single completion.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-4.1".into(),
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// InputConfig
// ---------------------------------------------------------------------------

/// Locations of the read-only inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// JSON array of lecture records.
    pub lectures_file: PathBuf,
    /// JSON object carrying `course_title`.
    pub course_info_file: PathBuf,
    /// Plain-text style reference embedded in every styling prompt.
    pub style_sample_file: PathBuf,
    /// TOML file with an `[openai] api_key` entry.
    pub secrets_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            lectures_file: PathBuf::from("inputs/full_lecture_dump.json"),
            course_info_file: PathBuf::from("inputs/course_info.json"),
            style_sample_file: PathBuf::from("inputs/sample.txt"),
            secrets_file: PathBuf::from("secrets.toml"),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Where the generated script tree is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("lectures"),
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Knobs for the generation fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Upper bound on modules processed at the same time.  Each module keeps
    /// at most two requests in flight, so this also bounds load on the API.
    pub max_concurrent_modules: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_modules: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use lecture_writer::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(config.generation.max_concurrent_modules > 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Completion endpoint settings.
    pub llm: LlmConfig,
    /// Input file locations.
    pub inputs: InputConfig,
    /// Output tree location.
    pub output: OutputConfig,
    /// Concurrency settings.
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the API key: settings first, then the secrets file, then the
    /// `OPENAI_API_KEY` environment variable.
    ///
    /// Returns `Ok(None)` when no source provides a non-empty key; local
    /// OpenAI-compatible servers accept unauthenticated requests.
    pub fn resolve_api_key(&self) -> Result<Option<String>> {
        if let Some(key) = self.llm.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(Some(key.to_string()));
        }
        if let Some(key) = Secrets::load_from(&self.inputs.secrets_file)?.openai_key() {
            return Ok(Some(key));
        }
        Ok(std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// Contents of the secrets TOML file:
///
/// ```toml
/// [openai]
/// api_key = "sk-..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub openai: Option<OpenAiSecrets>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenAiSecrets {
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Secrets {
    /// Load the secrets file; a missing file yields empty secrets.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let secrets: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(secrets)
    }

    /// The non-empty `[openai] api_key`, if any.
    pub fn openai_key(&self) -> Option<String> {
        self.openai
            .as_ref()
            .and_then(|o| o.api_key.clone())
            .filter(|k| !k.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.llm.base_url, loaded.llm.base_url);
        assert_eq!(original.llm.api_key, loaded.llm.api_key);
        assert_eq!(original.llm.model, loaded.llm.model);
        assert_eq!(original.llm.timeout_secs, loaded.llm.timeout_secs);
        assert_eq!(original.inputs.lectures_file, loaded.inputs.lectures_file);
        assert_eq!(original.output.root, loaded.output.root);
        assert_eq!(
            original.generation.max_concurrent_modules,
            loaded.generation.max_concurrent_modules
        );
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.llm.model, "gpt-4.1");
        assert_eq!(config.output.root, PathBuf::from("lectures"));
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
        assert_eq!(cfg.llm.model, "gpt-4.1");
        assert!(cfg.llm.api_key.is_none());
        assert_eq!(
            cfg.inputs.lectures_file,
            PathBuf::from("inputs/full_lecture_dump.json")
        );
        assert_eq!(cfg.inputs.style_sample_file, PathBuf::from("inputs/sample.txt"));
        assert_eq!(cfg.generation.max_concurrent_modules, 4);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.base_url, "https://api.openai.com");
        assert_eq!(cfg.generation.max_concurrent_modules, 4);
    }

    #[test]
    fn api_key_from_settings_wins() {
        let dir = tempdir().expect("temp dir");
        let secrets = dir.path().join("secrets.toml");
        std::fs::write(&secrets, "[openai]\napi_key = \"sk-secrets\"\n").unwrap();

        let mut cfg = AppConfig::default();
        cfg.inputs.secrets_file = secrets;
        cfg.llm.api_key = Some("sk-settings".into());

        assert_eq!(cfg.resolve_api_key().unwrap().as_deref(), Some("sk-settings"));
    }

    #[test]
    fn api_key_falls_back_to_secrets_file() {
        let dir = tempdir().expect("temp dir");
        let secrets = dir.path().join("secrets.toml");
        std::fs::write(&secrets, "[openai]\napi_key = \"sk-secrets\"\n").unwrap();

        let mut cfg = AppConfig::default();
        cfg.inputs.secrets_file = secrets;
        cfg.llm.api_key = Some(String::new());

        assert_eq!(cfg.resolve_api_key().unwrap().as_deref(), Some("sk-secrets"));
    }

    #[test]
    fn malformed_secrets_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let secrets = dir.path().join("secrets.toml");
        std::fs::write(&secrets, "[openai\napi_key = ").unwrap();

        let mut cfg = AppConfig::default();
        cfg.inputs.secrets_file = secrets;
        assert!(cfg.resolve_api_key().is_err());
    }
}

//! Where `settings.toml` lives when `--config` is not given.
//!
//! `dirs::config_dir()` joined with `lecture-writer`, e.g.
//! `~/.config/lecture-writer/settings.toml` on Linux.  Inputs and outputs
//! are not here: they are relative paths in the settings themselves.

use std::path::PathBuf;

/// Default settings location.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "lecture-writer";

    /// Platform config dir, or `./lecture-writer` when there is none.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");

        Self {
            config_dir,
            settings_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

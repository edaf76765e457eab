//! The output tree on disk.
//!
//! Artifacts are written once.  The only thing ever removed is a module's
//! previous intro/conclusion pair, right before it is regenerated.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::manifest::CourseManifest;
use super::naming::{MANIFEST_FILE, MODULE_CONCLUSION_FILE, MODULE_INTRO_FILE};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> LayoutError + '_ {
    move |source| LayoutError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Handle on the output root.  Cheap to clone.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn module_dir(&self, directory: &str) -> PathBuf {
        self.root.join(directory)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Create the root if needed.
    pub async fn ensure_root(&self) -> Result<(), LayoutError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(io_err(&self.root))
    }

    /// Create (or reuse) a module directory and return its path.
    pub async fn ensure_module_dir(&self, directory: &str) -> Result<PathBuf, LayoutError> {
        let path = self.module_dir(directory);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(io_err(&path))?;
        Ok(path)
    }

    /// Write `text` to `path` as UTF-8.
    pub async fn write_artifact(&self, path: &Path, text: &str) -> Result<(), LayoutError> {
        tokio::fs::write(path, text).await.map_err(io_err(path))?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    /// Delete a module's `00_intro.txt` / `99_conclusion.txt` if present.
    pub async fn remove_bookends(&self, module_dir: &Path) -> Result<(), LayoutError> {
        for name in [MODULE_INTRO_FILE, MODULE_CONCLUSION_FILE] {
            let path = module_dir.join(name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => log::debug!("removed stale {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(io_err(&path)(e)),
            }
        }
        Ok(())
    }

    pub async fn write_manifest(&self, manifest: &CourseManifest) -> Result<(), LayoutError> {
        let path = self.manifest_path();
        let json = serde_json::to_string_pretty(manifest).map_err(|source| {
            LayoutError::Manifest {
                path: path.clone(),
                source,
            }
        })?;
        self.write_artifact(&path, &json).await
    }

    /// Read the manifest; `Ok(None)` when the lecture phase has not run.
    pub async fn read_manifest(&self) -> Result<Option<CourseManifest>, LayoutError> {
        let path = self.manifest_path();
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&path)(e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| LayoutError::Manifest { path, source })
    }
}

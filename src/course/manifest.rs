//! `course_manifest.json`: what the lecture phase produced and where.
//!
//! The intro phase looks module directories up here instead of guessing them
//! from the directory listing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseManifest {
    pub course_title: String,
    pub modules: Vec<ManifestModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestModule {
    /// Module name exactly as it appears in the dataset.
    pub name: String,
    /// Directory name under the output root, e.g. `01_Memory`.
    pub directory: String,
    #[serde(default)]
    pub lectures: Vec<ManifestLecture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestLecture {
    pub title: String,
    pub file: String,
    pub status: String,
}

impl CourseManifest {
    /// Directory recorded for `module_name`, matched exactly.
    pub fn directory_for(&self, module_name: &str) -> Option<&str> {
        self.modules
            .iter()
            .find(|m| m.name == module_name)
            .map(|m| m.directory.as_str())
    }
}

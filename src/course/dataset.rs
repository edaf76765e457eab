//! Input loading: lecture records, course info and the style sample.
//!
//! The lecture dump is a JSON array of objects keyed the way the course
//! export writes them (`title_en`, `module_en`, `topic_content_en`, ...).
//! Every field is optional; `null` reads as empty.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Title used when a record carries none.
pub const UNTITLED_LECTURE: &str = "Untitled Lecture";

/// Course title used when `course_info.json` carries none.
pub const DEFAULT_COURSE_TITLE: &str = "Course";

// ---------------------------------------------------------------------------
// DatasetError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// LectureRecord
// ---------------------------------------------------------------------------

/// One lecture as exported from the course catalogue.  Read-only input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LectureRecord {
    #[serde(
        rename = "title_en",
        default = "untitled",
        deserialize_with = "title_or_untitled"
    )]
    pub title: String,

    #[serde(rename = "module_en", default, deserialize_with = "non_blank")]
    pub module: Option<String>,

    /// Topic-specific content; the primary fact-check reference.
    #[serde(rename = "topic_content_en", default, deserialize_with = "null_as_empty")]
    pub topic_content: String,

    /// Generic content, used as reference when `topic_content` is blank.
    #[serde(rename = "content_en", default, deserialize_with = "null_as_empty")]
    pub content: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub learning_objective: String,

    #[serde(rename = "lecture_outline", default, deserialize_with = "outline_entries")]
    pub outline: Vec<String>,
}

impl LectureRecord {
    /// A record with only a title and module, everything else empty.
    pub fn new(title: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            module: Some(module.into()),
            topic_content: String::new(),
            content: String::new(),
            description: String::new(),
            learning_objective: String::new(),
            outline: Vec::new(),
        }
    }

    /// Text the fact-checker compares against: the topic content, or the
    /// generic content when the topic content is blank.
    pub fn reference_content(&self) -> &str {
        let topic = self.topic_content.trim();
        if topic.is_empty() {
            self.content.trim()
        } else {
            topic
        }
    }
}

fn untitled() -> String {
    UNTITLED_LECTURE.to_string()
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn non_blank<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.trim().is_empty()))
}

fn title_or_untitled<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_blank(d)?.unwrap_or_else(untitled))
}

/// The outline arrives as a list of strings, a single string, or `null`.
fn outline_entries<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Value>),
        Text(String),
    }

    let entries = match Option::<Raw>::deserialize(d)? {
        None => Vec::new(),
        Some(Raw::Text(text)) if text.trim().is_empty() => Vec::new(),
        Some(Raw::Text(text)) => vec![text],
        Some(Raw::List(items)) => items
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
    };
    Ok(entries)
}

// ---------------------------------------------------------------------------
// CourseInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseInfo {
    #[serde(default = "default_course_title", deserialize_with = "course_title")]
    pub course_title: String,
}

impl Default for CourseInfo {
    fn default() -> Self {
        Self {
            course_title: default_course_title(),
        }
    }
}

fn default_course_title() -> String {
    DEFAULT_COURSE_TITLE.to_string()
}

fn course_title<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_blank(d)?.unwrap_or_else(default_course_title))
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T, DatasetError> {
    serde_json::from_str(text).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the lecture dump (a JSON array of records).
pub async fn load_lectures(path: &Path) -> Result<Vec<LectureRecord>, DatasetError> {
    let text = tokio::fs::read_to_string(path).await.map_err(io_err(path))?;
    parse(path, &text)
}

/// Load `course_info.json`.  A missing file yields the default title.
pub async fn load_course_info(path: &Path) -> Result<CourseInfo, DatasetError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "course info {} not found; using title '{}'",
                path.display(),
                DEFAULT_COURSE_TITLE
            );
            return Ok(CourseInfo::default());
        }
        Err(e) => return Err(io_err(path)(e)),
    };
    parse(path, &text)
}

/// Load the style reference verbatim.
pub async fn load_style_sample(path: &Path) -> Result<String, DatasetError> {
    tokio::fs::read_to_string(path).await.map_err(io_err(path))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

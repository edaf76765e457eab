//! Prompt templates.
//!
//! Pure functions from context records to prompt text, split by what they
//! generate:
//! * [`lecture`]: the five lecture stages plus the previous-lecture summary.
//! * [`course`]: course and module intro/conclusion scripts.
//!
//! Missing neighbours are spelled out with the sentinels below so the model
//! can say "this is the first topic" instead of inventing one.

pub mod course;
pub mod lecture;

/// Stands in for the previous topic/summary of a module's first lecture.
pub const FIRST_TOPIC: &str = "None (this is the first topic in the module)";

/// Stands in for the next topic of a module's last lecture.
pub const LAST_TOPIC: &str = "None (this is the last topic in the module)";

/// Previous-lecture summary when the predecessor's script is not on disk.
pub const PREVIOUS_NOT_FOUND: &str = "[Previous lecture script not found.]";

//! Parser for fact-checker responses.
//!
//! The fact-checker is asked to answer either `{}` (nothing to fix) or
//! `{"corrected_script": "...", "state": "Corrected"}`.  Model output is
//! trusted as given: anything that is not a JSON object carrying a non-empty
//! `corrected_script` string leaves the script unchanged.

use serde_json::Value;

/// Outcome of fact-checking one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionResult {
    /// The checker rewrote the script; holds the trimmed replacement.
    Corrected(String),
    /// Keep the script as it was.
    Unchanged,
}

impl CorrectionResult {
    pub fn is_corrected(&self) -> bool {
        matches!(self, CorrectionResult::Corrected(_))
    }
}

/// How a response was read, kept separate so malformed output can be logged
/// apart from a genuine "no correction needed".
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Corrected(String),
    NoCorrection,
    Malformed(String),
}

fn classify(text: &str) -> Verdict {
    let value: Value = match serde_json::from_str(text.trim()) {
        Ok(v) => v,
        Err(e) => return Verdict::Malformed(e.to_string()),
    };

    let Some(object) = value.as_object() else {
        return Verdict::Malformed("response is not a JSON object".into());
    };

    match object.get("corrected_script").and_then(Value::as_str) {
        Some(script) if !script.trim().is_empty() => Verdict::Corrected(script.trim().to_string()),
        _ => Verdict::NoCorrection,
    }
}

/// Parse a raw fact-check completion.
///
/// ```
/// use lecture_writer::llm::{parse_correction, CorrectionResult};
///
/// assert_eq!(parse_correction("{}"), CorrectionResult::Unchanged);
/// assert_eq!(parse_correction("not json"), CorrectionResult::Unchanged);
/// assert_eq!(
///     parse_correction(r#"{"corrected_script": "X", "state": "Corrected"}"#),
///     CorrectionResult::Corrected("X".into())
/// );
/// ```
pub fn parse_correction(text: &str) -> CorrectionResult {
    match classify(text) {
        Verdict::Corrected(script) => {
            log::debug!("fact-check: script corrected ({} chars)", script.len());
            CorrectionResult::Corrected(script)
        }
        Verdict::NoCorrection => {
            log::debug!("fact-check: no corrections needed");
            CorrectionResult::Unchanged
        }
        Verdict::Malformed(reason) => {
            log::warn!("fact-check response could not be parsed ({reason}); keeping script");
            CorrectionResult::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_unchanged() {
        assert_eq!(parse_correction("{}"), CorrectionResult::Unchanged);
        assert_eq!(classify("{}"), Verdict::NoCorrection);
    }

    #[test]
    fn corrected_script_is_extracted() {
        let raw = r#"{"corrected_script": "X", "state": "Corrected"}"#;
        assert_eq!(parse_correction(raw), CorrectionResult::Corrected("X".into()));
    }

    #[test]
    fn corrected_script_is_trimmed() {
        let raw = "  {\"corrected_script\": \"\\n  Fixed script.  \\n\"}\n";
        assert_eq!(
            parse_correction(raw),
            CorrectionResult::Corrected("Fixed script.".into())
        );
    }

    #[test]
    fn non_json_is_unchanged_and_malformed() {
        assert_eq!(parse_correction("not json"), CorrectionResult::Unchanged);
        assert!(matches!(classify("not json"), Verdict::Malformed(_)));
    }

    #[test]
    fn placeholder_text_is_malformed() {
        let raw = "[ERROR: Could not fact-check lecture: completion request timed out]";
        assert!(matches!(classify(raw), Verdict::Malformed(_)));
        assert_eq!(parse_correction(raw), CorrectionResult::Unchanged);
    }

    #[test]
    fn fenced_json_is_not_unwrapped() {
        let raw = "```json\n{\"corrected_script\": \"X\"}\n```";
        assert_eq!(parse_correction(raw), CorrectionResult::Unchanged);
    }

    #[test]
    fn blank_corrected_script_is_unchanged() {
        let raw = r#"{"corrected_script": "   ", "state": "Corrected"}"#;
        assert_eq!(classify(raw), Verdict::NoCorrection);
    }

    #[test]
    fn non_string_corrected_script_is_unchanged() {
        let raw = r#"{"corrected_script": 42}"#;
        assert_eq!(parse_correction(raw), CorrectionResult::Unchanged);
    }

    #[test]
    fn state_without_script_is_unchanged() {
        let raw = r#"{"state": "Corrected"}"#;
        assert_eq!(parse_correction(raw), CorrectionResult::Unchanged);
    }

    #[test]
    fn json_array_is_malformed() {
        assert!(matches!(classify("[1, 2]"), Verdict::Malformed(_)));
    }

    #[test]
    fn is_corrected_helper() {
        assert!(CorrectionResult::Corrected("x".into()).is_corrected());
        assert!(!CorrectionResult::Unchanged.is_corrected());
    }
}

//! Lecture stage state machine and correction status.
//!
//! ```text
//! Research ──▶ Structure ──▶ Draft ──▶ Stylize ──▶ FactCheck ──▶ (done)
//! ```
//!
//! There is no error state: a failed stage still yields (placeholder) text
//! and the machine moves on.

use std::fmt;

use crate::llm::CorrectionResult;

/// Sampling temperature for the previous-lecture summary.
pub const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for course and module intros/conclusions.
pub const BOOKEND_TEMPERATURE: f32 = 0.7;

// ---------------------------------------------------------------------------
// LectureStage
// ---------------------------------------------------------------------------

/// One step of the per-lecture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LectureStage {
    /// Bullet-point extraction from the raw record.
    Research,
    /// Bullets reorganised into an intro/body/conclusion outline.
    Structure,
    /// Outline expanded into a spoken draft.
    Draft,
    /// Draft rewritten in the reference style.
    Stylize,
    /// Styled script checked against the record's own content.
    FactCheck,
}

impl LectureStage {
    /// Every stage, in execution order.
    pub const ALL: [LectureStage; 5] = [
        LectureStage::Research,
        LectureStage::Structure,
        LectureStage::Draft,
        LectureStage::Stylize,
        LectureStage::FactCheck,
    ];

    /// The stage that follows this one, `None` after the last.
    ///
    /// ```
    /// use lecture_writer::pipeline::LectureStage;
    ///
    /// assert_eq!(LectureStage::Research.next(), Some(LectureStage::Structure));
    /// assert_eq!(LectureStage::FactCheck.next(), None);
    /// ```
    pub fn next(self) -> Option<Self> {
        match self {
            LectureStage::Research => Some(LectureStage::Structure),
            LectureStage::Structure => Some(LectureStage::Draft),
            LectureStage::Draft => Some(LectureStage::Stylize),
            LectureStage::Stylize => Some(LectureStage::FactCheck),
            LectureStage::FactCheck => None,
        }
    }

    /// Name of the agent role, used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            LectureStage::Research => "Researcher",
            LectureStage::Structure => "Structurer",
            LectureStage::Draft => "Lecturer",
            LectureStage::Stylize => "Stylist",
            LectureStage::FactCheck => "Fact-checker",
        }
    }

    /// Sampling temperature: factual stages run cool, creative ones warm.
    pub fn temperature(self) -> f32 {
        match self {
            LectureStage::Research | LectureStage::FactCheck => 0.3,
            LectureStage::Structure => 0.4,
            LectureStage::Draft | LectureStage::Stylize => 0.7,
        }
    }

    /// Completes "Could not …" in this stage's failure placeholder.
    pub fn failure_action(self, title: &str) -> String {
        match self {
            LectureStage::Research => format!("extract main points for '{title}'"),
            LectureStage::Structure => format!("structure outline for '{title}'"),
            LectureStage::Draft => format!("generate lecture for '{title}'"),
            LectureStage::Stylize => format!("mimic style for '{title}'"),
            LectureStage::FactCheck => "fact-check lecture".to_string(),
        }
    }
}

impl fmt::Display for LectureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CorrectionStatus
// ---------------------------------------------------------------------------

/// Whether the fact-checker replaced the styled script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionStatus {
    Corrected,
    NoCorrectionsNeeded,
}

impl CorrectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            CorrectionStatus::Corrected => "Corrected",
            CorrectionStatus::NoCorrectionsNeeded => "No corrections needed",
        }
    }
}

impl From<&CorrectionResult> for CorrectionStatus {
    fn from(result: &CorrectionResult) -> Self {
        match result {
            CorrectionResult::Corrected(_) => CorrectionStatus::Corrected,
            CorrectionResult::Unchanged => CorrectionStatus::NoCorrectionsNeeded,
        }
    }
}

impl fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_the_next_chain() {
        let mut chain = vec![LectureStage::Research];
        while let Some(next) = chain.last().and_then(|s| s.next()) {
            chain.push(next);
        }
        assert_eq!(chain, LectureStage::ALL.to_vec());
    }

    #[test]
    fn temperatures() {
        assert!((LectureStage::Research.temperature() - 0.3).abs() < f32::EPSILON);
        assert!((LectureStage::Structure.temperature() - 0.4).abs() < f32::EPSILON);
        assert!((LectureStage::Draft.temperature() - 0.7).abs() < f32::EPSILON);
        assert!((LectureStage::Stylize.temperature() - 0.7).abs() < f32::EPSILON);
        assert!((LectureStage::FactCheck.temperature() - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn labels() {
        assert_eq!(LectureStage::Research.to_string(), "Researcher");
        assert_eq!(LectureStage::FactCheck.label(), "Fact-checker");
    }

    #[test]
    fn failure_actions_name_the_lecture() {
        assert_eq!(
            LectureStage::Research.failure_action("Borrowing"),
            "extract main points for 'Borrowing'"
        );
        assert_eq!(
            LectureStage::Stylize.failure_action("Borrowing"),
            "mimic style for 'Borrowing'"
        );
        assert_eq!(LectureStage::FactCheck.failure_action("x"), "fact-check lecture");
    }

    #[test]
    fn status_from_correction() {
        let corrected = CorrectionResult::Corrected("fixed".into());
        assert_eq!(CorrectionStatus::from(&corrected), CorrectionStatus::Corrected);
        assert_eq!(
            CorrectionStatus::from(&CorrectionResult::Unchanged).label(),
            "No corrections needed"
        );
    }
}

//! Per-lecture pipeline: Researcher → Structurer → Lecturer → Stylist →
//! Fact-checker.
//!
//! Each stage consumes the previous stage's text from a fresh
//! [`PipelineContext`].  Completions go through [`FallbackClient`], so a
//! failed call leaves a placeholder in the context and the next stage runs
//! on that.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::course::{lecture_file_name, LectureLinks, LectureRecord};
use crate::llm::{parse_correction, CorrectionResult, FallbackClient};
use crate::prompt::{self, FIRST_TOPIC, PREVIOUS_NOT_FOUND};

use super::state::{CorrectionStatus, LectureStage, SUMMARY_TEMPERATURE};

// ---------------------------------------------------------------------------
// PipelineContext
// ---------------------------------------------------------------------------

/// Working state for one lecture.  Created per lecture, dropped once the
/// final script is on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineContext {
    pub title: String,
    pub previous_title: Option<String>,
    pub next_title: Option<String>,
    /// Summary of the previous lecture's script, or a sentinel.
    pub previous_summary: String,
    pub main_points: String,
    pub outline: String,
    pub script: String,
    pub mimicked_script: String,
    pub final_script: String,
    pub correction: Option<CorrectionStatus>,
}

impl PipelineContext {
    pub fn new(record: &LectureRecord, links: &LectureLinks, previous_summary: String) -> Self {
        Self {
            title: record.title.clone(),
            previous_title: links.previous.clone(),
            next_title: links.next.clone(),
            previous_summary,
            ..Self::default()
        }
    }
}

/// Result of running the pipeline for one lecture.
#[derive(Debug, Clone, PartialEq)]
pub struct LectureScript {
    pub title: String,
    pub text: String,
    pub status: CorrectionStatus,
}

// ---------------------------------------------------------------------------
// LecturePipeline
// ---------------------------------------------------------------------------

/// Runs the five stages for a lecture.  Cheap to clone; one instance is
/// shared by every module task.
#[derive(Clone)]
pub struct LecturePipeline {
    llm: FallbackClient,
    style_sample: Arc<str>,
}

impl LecturePipeline {
    pub fn new(llm: FallbackClient, style_sample: impl Into<Arc<str>>) -> Self {
        Self {
            llm,
            style_sample: style_sample.into(),
        }
    }

    /// Run all stages in order and return the final script.
    pub async fn run(
        &self,
        record: &LectureRecord,
        links: &LectureLinks,
        previous_summary: String,
    ) -> LectureScript {
        let mut ctx = PipelineContext::new(record, links, previous_summary);

        let mut stage = Some(LectureStage::Research);
        while let Some(current) = stage {
            log::debug!("'{}': {}", ctx.title, current);
            self.advance(&mut ctx, record, current).await;
            stage = current.next();
        }

        LectureScript {
            title: ctx.title,
            text: ctx.final_script,
            status: ctx.correction.unwrap_or(CorrectionStatus::NoCorrectionsNeeded),
        }
    }

    async fn advance(&self, ctx: &mut PipelineContext, record: &LectureRecord, stage: LectureStage) {
        let action = stage.failure_action(&ctx.title);
        let temperature = stage.temperature();

        match stage {
            LectureStage::Research => {
                let request = prompt::lecture::research(record);
                ctx.main_points = self.llm.complete(&request, temperature, &action).await;
            }
            LectureStage::Structure => {
                let request = prompt::lecture::structure(&ctx.title, &ctx.main_points);
                ctx.outline = self.llm.complete(&request, temperature, &action).await;
            }
            LectureStage::Draft => {
                let request = prompt::lecture::draft(
                    &ctx.title,
                    &ctx.outline,
                    &ctx.previous_summary,
                    ctx.next_title.as_deref(),
                );
                ctx.script = self.llm.complete(&request, temperature, &action).await;
            }
            LectureStage::Stylize => {
                let request = prompt::lecture::stylize(
                    &ctx.title,
                    ctx.previous_title.as_deref(),
                    ctx.next_title.as_deref(),
                    &self.style_sample,
                    &ctx.script,
                );
                ctx.mimicked_script = self.llm.complete(&request, temperature, &action).await;
            }
            LectureStage::FactCheck => {
                let request =
                    prompt::lecture::fact_check(record.reference_content(), &ctx.mimicked_script);
                let response = self.llm.complete(&request, temperature, &action).await;
                let result = parse_correction(&response);
                ctx.correction = Some(CorrectionStatus::from(&result));
                ctx.final_script = match result {
                    CorrectionResult::Corrected(text) => text,
                    CorrectionResult::Unchanged => ctx.mimicked_script.clone(),
                };
            }
        }
    }

    /// Summary of the lecture before `position` in `module_dir`.
    ///
    /// * first lecture → [`FIRST_TOPIC`]
    /// * predecessor's file missing → [`PREVIOUS_NOT_FOUND`]
    /// * otherwise a single summarising completion over the file contents
    pub async fn previous_summary(
        &self,
        module_dir: &Path,
        position: usize,
        previous_title: Option<&str>,
    ) -> String {
        let Some(previous_title) = previous_title else {
            return FIRST_TOPIC.to_string();
        };
        let Some(previous_position) = position.checked_sub(1) else {
            return FIRST_TOPIC.to_string();
        };

        let path = module_dir.join(lecture_file_name(previous_position, previous_title));
        let script = match tokio::fs::read_to_string(&path).await {
            Ok(script) => script,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    log::warn!("could not read {}: {e}", path.display());
                } else {
                    log::debug!("previous lecture {} not on disk", path.display());
                }
                return PREVIOUS_NOT_FOUND.to_string();
            }
        };

        self.llm
            .complete(
                &prompt::lecture::summarize(&script),
                SUMMARY_TEMPERATURE,
                "summarize previous lecture",
            )
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

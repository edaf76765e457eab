//! Lecture phase: one task per module, lectures in order inside each task.
//!
//! ```text
//! ModuleOrchestrator::run
//!   ├─ module 01 ─▶ lecture 1 ─▶ lecture 2 ─▶ …   (sequential)
//!   ├─ module 02 ─▶ lecture 1 ─▶ …                (concurrent with 01)
//!   └─ …           at most `max_concurrent` modules in flight
//! ```
//!
//! Lecture N reads lecture N-1's file for its "previous lecture" summary,
//! which is why lectures inside a module never overlap.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::course::{
    lecture_file_name, module_dir_name, CourseManifest, LayoutError, ManifestLecture,
    ManifestModule, ModuleGroup, OutputLayout,
};
use crate::llm::is_placeholder;

use super::lecture::LecturePipeline;
use super::state::CorrectionStatus;

/// One generated lecture file.
#[derive(Debug, Clone, PartialEq)]
pub struct LectureEntry {
    pub title: String,
    pub file: String,
    pub status: CorrectionStatus,
    /// The written script is a failure placeholder rather than lecture text.
    pub incomplete: bool,
}

/// What one module produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleReport {
    pub name: String,
    pub directory: String,
    pub lectures: Vec<LectureEntry>,
}

/// Lecture phase outcome, in module order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LecturePhaseReport {
    pub modules: Vec<ModuleReport>,
    /// Names of modules that failed; their siblings were unaffected.
    pub failed: Vec<String>,
}

impl LecturePhaseReport {
    /// `true` when every module finished.
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Lectures whose final script is a placeholder, as `directory/file`.
    pub fn incomplete_lectures(&self) -> Vec<String> {
        self.modules
            .iter()
            .flat_map(|m| {
                m.lectures
                    .iter()
                    .filter(|l| l.incomplete)
                    .map(move |l| format!("{}/{}", m.directory, l.file))
            })
            .collect()
    }

    /// Manifest for the intro phase.  Failed modules keep their directory
    /// entry with whatever lectures are recorded (none).
    pub fn manifest(&self, course_title: &str, groups: &[ModuleGroup]) -> CourseManifest {
        let modules = groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let report = self.modules.iter().find(|m| m.name == group.name);
                ManifestModule {
                    name: group.name.clone(),
                    directory: report
                        .map(|r| r.directory.clone())
                        .unwrap_or_else(|| module_dir_name(i, &group.name)),
                    lectures: report
                        .map(|r| {
                            r.lectures
                                .iter()
                                .map(|l| ManifestLecture {
                                    title: l.title.clone(),
                                    file: l.file.clone(),
                                    status: l.status.label().to_string(),
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                }
            })
            .collect();

        CourseManifest {
            course_title: course_title.to_string(),
            modules,
        }
    }
}

// ---------------------------------------------------------------------------
// ModuleOrchestrator
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ModuleOrchestrator {
    pipeline: LecturePipeline,
    layout: OutputLayout,
    limit: Arc<Semaphore>,
}

impl ModuleOrchestrator {
    /// `max_concurrent` is clamped to at least one.
    pub fn new(pipeline: LecturePipeline, layout: OutputLayout, max_concurrent: usize) -> Self {
        Self {
            pipeline,
            layout,
            limit: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Generate every lecture of every module.
    ///
    /// Errors only when the output root cannot be created; a failing module
    /// is logged and listed in [`LecturePhaseReport::failed`].
    pub async fn run(&self, groups: &[ModuleGroup]) -> Result<LecturePhaseReport, LayoutError> {
        self.layout.ensure_root().await?;

        let handles: Vec<_> = groups
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, group)| {
                let this = self.clone();
                tokio::spawn(async move {
                    let _permit = this.limit.acquire().await;
                    this.run_module(position, &group).await
                })
            })
            .collect();

        let mut slots: Vec<Option<ModuleReport>> = vec![None; groups.len()];
        let mut report = LecturePhaseReport::default();

        for ((position, handle), group) in handles.into_iter().enumerate().zip(groups) {
            match handle.await {
                Ok(Ok(module)) => slots[position] = Some(module),
                Ok(Err(e)) => {
                    log::error!("error processing module '{}': {e}", group.name);
                    report.failed.push(group.name.clone());
                }
                Err(e) => {
                    log::error!("module task '{}' aborted: {e}", group.name);
                    report.failed.push(group.name.clone());
                }
            }
        }

        report.modules = slots.into_iter().flatten().collect();
        Ok(report)
    }

    /// Generate one module's lectures in list order.
    ///
    /// `position` is the module's 0-based index in the course.
    pub async fn run_module(
        &self,
        position: usize,
        group: &ModuleGroup,
    ) -> Result<ModuleReport, LayoutError> {
        let directory = module_dir_name(position, &group.name);
        let module_dir = self.layout.ensure_module_dir(&directory).await?;
        log::info!(
            "generating {directory} ({} lectures)",
            group.lectures.len()
        );

        let mut lectures = Vec::with_capacity(group.lectures.len());
        for (i, (record, links)) in group.lectures.iter().zip(group.links()).enumerate() {
            log::info!("processing '{}'", record.title);

            let previous_summary = self
                .pipeline
                .previous_summary(&module_dir, i, links.previous.as_deref())
                .await;
            let script = self.pipeline.run(record, &links, previous_summary).await;

            let file = lecture_file_name(i, &record.title);
            self.layout
                .write_artifact(&module_dir.join(&file), &script.text)
                .await?;

            let incomplete = is_placeholder(&script.text);
            if incomplete {
                log::warn!("'{}' was written as a placeholder", script.title);
            }
            lectures.push(LectureEntry {
                title: script.title,
                file,
                status: script.status,
                incomplete,
            });
        }

        log::info!("finished {directory}");
        Ok(ModuleReport {
            name: group.name.clone(),
            directory,
            lectures,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

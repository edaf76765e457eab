//! Intro phase: course bookends plus one intro/conclusion pair per module.
//!
//! ```text
//! CourseOrchestrator::run
//!   ├─ 000_course_intro.txt
//!   ├─ module 01 ─▶ (00_intro ∥ 99_conclusion)
//!   ├─ module 02 ─▶ (00_intro ∥ 99_conclusion)   (concurrent with 01)
//!   └─ zzz_course_conclusion.txt
//! ```
//!
//! Module directories come from the lecture phase's manifest; a module
//! missing from it gets the directory the lecture phase would have used.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::course::naming::{
    COURSE_CONCLUSION_FILE, COURSE_INTRO_FILE, MODULE_CONCLUSION_FILE, MODULE_INTRO_FILE,
};
use crate::course::{module_dir_name, CourseManifest, CourseOutline, LayoutError, OutputLayout};
use crate::llm::FallbackClient;
use crate::prompt;

use super::state::BOOKEND_TEMPERATURE;

/// Intro/conclusion pair written for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBookends {
    pub name: String,
    pub directory: String,
    pub intro_file: String,
    pub conclusion_file: String,
}

/// Intro phase outcome, in module order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroPhaseReport {
    pub modules: Vec<ModuleBookends>,
    pub failed: Vec<String>,
}

impl IntroPhaseReport {
    /// `true` when every module got its bookends.
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Directory for the module at `position`: the manifest's entry when there
/// is one, otherwise the deterministic `NN_<name>`.
pub fn resolve_directory(
    manifest: Option<&CourseManifest>,
    position: usize,
    module_name: &str,
) -> String {
    match manifest.and_then(|m| m.directory_for(module_name)) {
        Some(directory) => directory.to_string(),
        None => {
            let fallback = module_dir_name(position, module_name);
            log::warn!("module '{module_name}' not in manifest; using {fallback}");
            fallback
        }
    }
}

// ---------------------------------------------------------------------------
// CourseOrchestrator
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct CourseOrchestrator {
    llm: FallbackClient,
    style_sample: Arc<str>,
    layout: OutputLayout,
    limit: Arc<Semaphore>,
}

impl CourseOrchestrator {
    /// `max_concurrent` is clamped to at least one.
    pub fn new(
        llm: FallbackClient,
        style_sample: impl Into<Arc<str>>,
        layout: OutputLayout,
        max_concurrent: usize,
    ) -> Self {
        Self {
            llm,
            style_sample: style_sample.into(),
            layout,
            limit: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Write the course intro, every module's bookends, then the course
    /// conclusion.
    ///
    /// Errors when the root or a course-level file cannot be written; a
    /// failing module is logged and listed in [`IntroPhaseReport::failed`].
    pub async fn run(
        &self,
        outline: &CourseOutline,
        manifest: Option<&CourseManifest>,
    ) -> Result<IntroPhaseReport, LayoutError> {
        self.layout.ensure_root().await?;
        let course_summary = outline.summary();

        let intro = self
            .llm
            .complete(
                &prompt::course::course_intro(&outline.title, &course_summary, &self.style_sample),
                BOOKEND_TEMPERATURE,
                "generate course introduction",
            )
            .await;
        self.layout
            .write_artifact(&self.layout.root().join(COURSE_INTRO_FILE), &intro)
            .await?;
        log::info!("wrote {COURSE_INTRO_FILE}");

        let shared = Arc::new(outline.clone());
        let handles: Vec<_> = outline
            .modules
            .iter()
            .enumerate()
            .map(|(position, module)| {
                let directory = resolve_directory(manifest, position, &module.name);
                let this = self.clone();
                let outline = Arc::clone(&shared);
                tokio::spawn(async move {
                    let _permit = this.limit.acquire().await;
                    this.run_module(&outline, position, directory).await
                })
            })
            .collect();

        let mut report = IntroPhaseReport::default();
        for (handle, module) in handles.into_iter().zip(&outline.modules) {
            match handle.await {
                Ok(Ok(bookends)) => report.modules.push(bookends),
                Ok(Err(e)) => {
                    log::error!("error processing module '{}': {e}", module.name);
                    report.failed.push(module.name.clone());
                }
                Err(e) => {
                    log::error!("module task '{}' aborted: {e}", module.name);
                    report.failed.push(module.name.clone());
                }
            }
        }

        let conclusion = self
            .llm
            .complete(
                &prompt::course::course_conclusion(
                    &outline.title,
                    &course_summary,
                    &self.style_sample,
                ),
                BOOKEND_TEMPERATURE,
                "generate course conclusion",
            )
            .await;
        self.layout
            .write_artifact(&self.layout.root().join(COURSE_CONCLUSION_FILE), &conclusion)
            .await?;
        log::info!("wrote {COURSE_CONCLUSION_FILE}");

        Ok(report)
    }

    /// Regenerate the intro/conclusion pair of the module at `position`,
    /// which must index `outline.modules`.
    ///
    /// Stale files are removed first, so a failed write never leaves the
    /// previous run's text behind.
    async fn run_module(
        &self,
        outline: &CourseOutline,
        position: usize,
        directory: String,
    ) -> Result<ModuleBookends, LayoutError> {
        let current = &outline.modules[position];
        let previous = position.checked_sub(1).and_then(|p| outline.modules.get(p));
        let next = outline.modules.get(position + 1);

        let module_dir = self.layout.ensure_module_dir(&directory).await?;
        self.layout.remove_bookends(&module_dir).await?;

        let course_summary = outline.summary();
        let intro_prompt =
            prompt::course::module_intro(&outline.title, previous, current, &self.style_sample);
        let conclusion_prompt = prompt::course::module_conclusion(
            &outline.title,
            current,
            next,
            &course_summary,
            &self.style_sample,
        );

        let (intro, conclusion) = tokio::join!(
            self.llm
                .complete(&intro_prompt, BOOKEND_TEMPERATURE, "generate introduction"),
            self.llm.complete(
                &conclusion_prompt,
                BOOKEND_TEMPERATURE,
                "generate conclusion"
            ),
        );

        self.layout
            .write_artifact(&module_dir.join(MODULE_INTRO_FILE), &intro)
            .await?;
        self.layout
            .write_artifact(&module_dir.join(MODULE_CONCLUSION_FILE), &conclusion)
            .await?;
        log::info!("wrote bookends for {directory}");

        Ok(ModuleBookends {
            name: current.name.clone(),
            directory,
            intro_file: MODULE_INTRO_FILE.to_string(),
            conclusion_file: MODULE_CONCLUSION_FILE.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{ManifestModule, ModuleOutline};
    use crate::llm::mock::ScriptedClient;
    use crate::llm::PLACEHOLDER_PREFIX;
    use tempfile::tempdir;

    const BOOKEND: &str = "You are an expert lecturer.";

    fn course(modules: &[(&str, &[&str])]) -> CourseOutline {
        CourseOutline {
            title: "Rust".into(),
            modules: modules
                .iter()
                .map(|(name, lectures)| ModuleOutline {
                    name: name.to_string(),
                    lectures: lectures.iter().map(|l| l.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn orchestrator(client: Arc<ScriptedClient>, root: &std::path::Path) -> CourseOrchestrator {
        CourseOrchestrator::new(FallbackClient::new(client), "style", OutputLayout::new(root), 2)
    }

    fn read(path: std::path::PathBuf) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn manifest_directory_wins_over_position() {
        let manifest = CourseManifest {
            course_title: "Rust".into(),
            modules: vec![ManifestModule {
                name: "Memory".into(),
                directory: "07_Custom".into(),
                lectures: vec![],
            }],
        };
        assert_eq!(resolve_directory(Some(&manifest), 0, "Memory"), "07_Custom");
        assert_eq!(resolve_directory(Some(&manifest), 1, "Traits"), "02_Traits");
        assert_eq!(resolve_directory(None, 2, "Async IO"), "03_Async_IO");
    }

    #[tokio::test]
    async fn writes_course_and_module_bookends() {
        let dir = tempdir().unwrap();
        let client = Arc::new(ScriptedClient::echo());
        let orch = orchestrator(client, dir.path());

        let outline = course(&[("Memory", &["Ownership"]), ("Traits", &["Generics"])]);
        let report = orch.run(&outline, None).await.unwrap();

        assert!(report.failed.is_empty());
        let dirs: Vec<&str> = report.modules.iter().map(|m| m.directory.as_str()).collect();
        assert_eq!(dirs, vec!["01_Memory", "02_Traits"]);

        let course_intro = read(dir.path().join(COURSE_INTRO_FILE));
        assert!(course_intro.contains("introduce an online course"));
        assert!(course_intro.contains("Course Overview:\n1. Memory\n    1. Ownership\n2. Traits"));
        assert!(read(dir.path().join(COURSE_CONCLUSION_FILE)).contains("conclude an online course"));

        for module in ["01_Memory", "02_Traits"] {
            assert!(dir.path().join(module).join(MODULE_INTRO_FILE).is_file());
            assert!(dir.path().join(module).join(MODULE_CONCLUSION_FILE).is_file());
        }
    }

    #[tokio::test]
    async fn first_and_last_modules_use_their_variants() {
        let dir = tempdir().unwrap();
        let client = Arc::new(ScriptedClient::echo());
        let orch = orchestrator(client.clone(), dir.path());

        let outline = course(&[("Memory", &["Ownership"]), ("Traits", &["Generics"])]);
        orch.run(&outline, None).await.unwrap();

        let first_intros = client.prompts_for(BOOKEND, &["introduce the first module"]);
        assert_eq!(first_intros.len(), 1);
        assert!(first_intros[0].contains("Module: Memory"));

        let later_intros = client.prompts_for(BOOKEND, &["introduce a new module"]);
        assert_eq!(later_intros.len(), 1);
        assert!(later_intros[0].contains("Previous Module Summary:\nModule: Memory"));

        let last = client.prompts_for(BOOKEND, &["conclude the last module"]);
        assert_eq!(last.len(), 1);
        assert!(last[0].contains("Last Module Summary:\nModule: Traits"));
        assert!(last[0].contains("Course Summary:\nCourse Overview:"));

        let middle = client.prompts_for(BOOKEND, &["conclude a module"]);
        assert!(middle[0].contains("Next Module Summary:\nModule: Traits"));
    }

    #[tokio::test]
    async fn uses_manifest_directory_and_replaces_stale_bookends() {
        let dir = tempdir().unwrap();
        let module_dir = dir.path().join("05_Memory_Basics");
        std::fs::create_dir_all(&module_dir).unwrap();
        std::fs::write(module_dir.join(MODULE_INTRO_FILE), "stale").unwrap();

        let manifest = CourseManifest {
            course_title: "Rust".into(),
            modules: vec![ManifestModule {
                name: "Memory".into(),
                directory: "05_Memory_Basics".into(),
                lectures: vec![],
            }],
        };

        let client = Arc::new(ScriptedClient::echo());
        let orch = orchestrator(client, dir.path());
        let report = orch
            .run(&course(&[("Memory", &["Ownership"])]), Some(&manifest))
            .await
            .unwrap();

        assert_eq!(report.modules[0].directory, "05_Memory_Basics");
        let intro = read(module_dir.join(MODULE_INTRO_FILE));
        assert_ne!(intro, "stale");
        assert!(!dir.path().join("01_Memory").exists());
    }

    #[tokio::test]
    async fn failed_completion_is_written_as_placeholder() {
        let dir = tempdir().unwrap();
        let client = Arc::new(ScriptedClient::echo().failing_on("introduce the first module"));
        let orch = orchestrator(client, dir.path());

        let report = orch.run(&course(&[("Memory", &["Ownership"])]), None).await.unwrap();
        assert!(report.failed.is_empty());

        let intro = read(dir.path().join("01_Memory").join(MODULE_INTRO_FILE));
        assert!(intro.starts_with(PLACEHOLDER_PREFIX));
        assert!(intro.contains("generate introduction"));
        let conclusion = read(dir.path().join("01_Memory").join(MODULE_CONCLUSION_FILE));
        assert!(!conclusion.starts_with(PLACEHOLDER_PREFIX));
    }

    #[tokio::test]
    async fn blocked_module_directory_does_not_stop_the_course() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("01_Memory"), "not a directory").unwrap();

        let client = Arc::new(ScriptedClient::echo());
        let orch = orchestrator(client, dir.path());
        let report = orch
            .run(&course(&[("Memory", &["A"]), ("Traits", &["B"])]), None)
            .await
            .unwrap();

        assert!(!report.succeeded());
        assert_eq!(report.failed, vec!["Memory".to_string()]);
        assert_eq!(report.modules.len(), 1);
        assert!(dir.path().join(COURSE_CONCLUSION_FILE).is_file());
    }
}

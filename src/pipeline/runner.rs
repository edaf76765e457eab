//! Phase runners: load inputs from an [`AppConfig`], run an orchestrator,
//! persist what the next phase needs.
//!
//! ```text
//! run_lecture_phase
//!   └─▶ dataset + course info + style ─▶ ModuleOrchestrator ─▶ course_manifest.json
//!
//! run_intro_phase
//!   └─▶ dataset + course info + style + manifest ─▶ CourseOrchestrator
//! ```
//!
//! Both phases rebuild the module list from the dataset, so the intro phase
//! can run on its own against an existing output tree.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::course::{
    group_modules, load_course_info, load_lectures, load_style_sample, CourseOutline,
    ModuleGroup, OutputLayout,
};
use crate::llm::{CompletionClient, FallbackClient};

use super::course::{CourseOrchestrator, IntroPhaseReport};
use super::lecture::LecturePipeline;
use super::module::{LecturePhaseReport, ModuleOrchestrator};

/// Inputs shared by both phases.
struct PhaseInputs {
    course_title: String,
    groups: Vec<ModuleGroup>,
    style_sample: String,
}

async fn load_inputs(config: &AppConfig) -> Result<PhaseInputs> {
    let inputs = &config.inputs;

    let records = load_lectures(&inputs.lectures_file)
        .await
        .with_context(|| format!("loading lectures from {}", inputs.lectures_file.display()))?;
    let course = load_course_info(&inputs.course_info_file).await?;
    let style_sample = load_style_sample(&inputs.style_sample_file)
        .await
        .with_context(|| {
            format!(
                "loading style sample from {}",
                inputs.style_sample_file.display()
            )
        })?;

    let groups = group_modules(&records);
    if groups.is_empty() {
        log::warn!(
            "no modules found in {} ({} records)",
            inputs.lectures_file.display(),
            records.len()
        );
    }
    log::info!(
        "course '{}': {} modules, {} lectures",
        course.course_title,
        groups.len(),
        groups.iter().map(|g| g.lectures.len()).sum::<usize>()
    );

    Ok(PhaseInputs {
        course_title: course.course_title,
        groups,
        style_sample,
    })
}

/// Phase 1: every lecture script, then the manifest.
pub async fn run_lecture_phase(
    config: &AppConfig,
    client: Arc<dyn CompletionClient>,
) -> Result<LecturePhaseReport> {
    let inputs = load_inputs(config).await?;
    let layout = OutputLayout::new(&config.output.root);

    let pipeline = LecturePipeline::new(FallbackClient::new(client), inputs.style_sample);
    let orchestrator = ModuleOrchestrator::new(
        pipeline,
        layout.clone(),
        config.generation.max_concurrent_modules,
    );

    let report = orchestrator.run(&inputs.groups).await?;

    let manifest = report.manifest(&inputs.course_title, &inputs.groups);
    layout
        .write_manifest(&manifest)
        .await
        .context("writing course manifest")?;

    Ok(report)
}

/// Phase 2: course intro/conclusion and every module's bookends.
pub async fn run_intro_phase(
    config: &AppConfig,
    client: Arc<dyn CompletionClient>,
) -> Result<IntroPhaseReport> {
    let inputs = load_inputs(config).await?;
    let layout = OutputLayout::new(&config.output.root);

    let manifest = match layout.read_manifest().await {
        Ok(Some(manifest)) => Some(manifest),
        Ok(None) => {
            log::warn!(
                "{} not found; using positional module directories",
                layout.manifest_path().display()
            );
            None
        }
        Err(e) => {
            log::warn!("{e}; using positional module directories");
            None
        }
    };

    let outline = CourseOutline::from_groups(inputs.course_title, &inputs.groups);
    let orchestrator = CourseOrchestrator::new(
        FallbackClient::new(client),
        inputs.style_sample,
        layout,
        config.generation.max_concurrent_modules,
    );

    Ok(orchestrator.run(&outline, manifest.as_ref()).await?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::naming::{MANIFEST_FILE, MODULE_INTRO_FILE};
    use crate::llm::mock::ScriptedClient;
    use std::path::Path;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.inputs.lectures_file = dir.join("lectures.json");
        config.inputs.course_info_file = dir.join("course_info.json");
        config.inputs.style_sample_file = dir.join("sample.txt");
        config.output.root = dir.join("out");
        config
    }

    fn write_inputs(dir: &Path) {
        std::fs::write(
            dir.join("lectures.json"),
            r#"[
                {"title_en": "Ownership", "module_en": "Memory Basics"},
                {"title_en": "Borrowing", "module_en": "Memory Basics"},
                {"title_en": "Orphan", "module_en": null}
            ]"#,
        )
        .unwrap();
        std::fs::write(dir.join("course_info.json"), r#"{"course_title": "Rust"}"#).unwrap();
        std::fs::write(dir.join("sample.txt"), "Hey folks").unwrap();
    }

    #[tokio::test]
    async fn lecture_phase_writes_manifest() {
        let dir = tempdir().unwrap();
        write_inputs(dir.path());
        let config = config_in(dir.path());

        let report = run_lecture_phase(&config, Arc::new(ScriptedClient::echo()))
            .await
            .unwrap();
        assert_eq!(report.modules.len(), 1);
        assert_eq!(report.modules[0].lectures.len(), 2);

        let manifest = OutputLayout::new(&config.output.root)
            .read_manifest()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(manifest.course_title, "Rust");
        assert_eq!(manifest.directory_for("Memory Basics"), Some("01_Memory_Basics"));
        assert!(config.output.root.join(MANIFEST_FILE).is_file());
    }

    #[tokio::test]
    async fn intro_phase_runs_without_manifest() {
        let dir = tempdir().unwrap();
        write_inputs(dir.path());
        let config = config_in(dir.path());

        let report = run_intro_phase(&config, Arc::new(ScriptedClient::echo()))
            .await
            .unwrap();
        assert_eq!(report.modules[0].directory, "01_Memory_Basics");
        assert!(config
            .output
            .root
            .join("01_Memory_Basics")
            .join(MODULE_INTRO_FILE)
            .is_file());
    }

    #[tokio::test]
    async fn missing_dataset_is_fatal() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let err = run_lecture_phase(&config, Arc::new(ScriptedClient::echo()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("loading lectures"));
        assert!(!config.output.root.exists());
    }
}

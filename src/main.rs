//! Application entry point: lecture-writer.
//!
//! # Startup sequence
//!
//! 1. Parse CLI arguments.
//! 2. Initialise logging.
//! 3. Load [`AppConfig`] (defaults when the settings file is absent) and
//!    apply CLI overrides.
//! 4. Resolve the API key and build the [`ApiClient`].
//! 5. Create the [`tokio`] runtime.
//! 6. Run the selected phases in order: lectures, then intros.  A phase
//!    that leaves any module unfinished stops the run with exit code 1.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lecture_writer::{
    config::{AppConfig, AppPaths},
    llm::{ApiClient, CompletionClient},
    pipeline::{run_intro_phase, run_lecture_phase, IntroPhaseReport, LecturePhaseReport},
};

/// Generate lecture scripts and module/course intros from a course dataset.
#[derive(Parser, Debug)]
#[command(name = "lecture-writer")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the settings file (default: <config dir>/lecture-writer/settings.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output root for generated scripts
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Model identifier sent with every request
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum number of modules generated at once
    #[arg(long, value_name = "N")]
    max_concurrent_modules: Option<usize>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Lecture scripts, then intros and conclusions (default)
    All,
    /// Lecture scripts only
    Lectures,
    /// Course and module intros/conclusions only
    Intros,
    /// Write a default settings file (to --config, or the platform config dir)
    InitConfig,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn load_config(args: &Args) -> AppConfig {
    let loaded = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e:#}); using defaults");
        AppConfig::default()
    });

    if let Some(output) = &args.output {
        config.output.root = output.clone();
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(n) = args.max_concurrent_modules {
        config.generation.max_concurrent_modules = n;
    }
    config
}

/// Write default settings to `path` unless a file is already there.
/// Returns whether a file was written.
fn init_config(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    AppConfig::default().save_to(path)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

fn print_lecture_report(report: &LecturePhaseReport) {
    println!("\n--- Lecture Scripts ---");
    for module in &report.modules {
        for lecture in &module.lectures {
            let marker = if lecture.incomplete { ", incomplete" } else { "" };
            println!(
                "{}/{}  {}  [{}{marker}]",
                module.directory, lecture.file, lecture.title, lecture.status
            );
        }
    }
    for name in &report.failed {
        println!("FAILED module: {name}");
    }
    let incomplete = report.incomplete_lectures();
    if !incomplete.is_empty() {
        println!(
            "{} lecture(s) contain placeholder text and need regenerating",
            incomplete.len()
        );
    }
}

fn print_intro_report(report: &IntroPhaseReport) {
    println!("\n--- Intros and Conclusions ---");
    for module in &report.modules {
        println!(
            "{}: {}, {}",
            module.directory, module.intro_file, module.conclusion_file
        );
    }
    for name in &report.failed {
        println!("FAILED module: {name}");
    }
}

/// Error line for a phase that left modules unfinished.
fn phase_failure(phase: &str, failed: &[String]) -> String {
    format!(
        "Error running {phase}: {} module(s) failed: {}",
        failed.len(),
        failed.join(", ")
    )
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // 1. CLI
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::All);

    // 2. Logging
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::info!("lecture-writer starting up");

    if command == Command::InitConfig {
        let path = args
            .config
            .clone()
            .unwrap_or_else(|| AppPaths::new().settings_file);
        return match init_config(&path) {
            Ok(true) => {
                println!("Wrote default settings to {}", path.display());
                ExitCode::SUCCESS
            }
            Ok(false) => {
                println!("{} already exists; left unchanged", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error writing {}: {e:#}", path.display());
                ExitCode::from(1)
            }
        };
    }

    // 3. Configuration
    let config = load_config(&args);

    // 4. LLM client
    let api_key = config.resolve_api_key().unwrap_or_else(|e| {
        log::warn!("Failed to read secrets ({e:#})");
        None
    });
    if api_key.is_none() {
        log::warn!("No API key configured; requests will be sent unauthenticated");
    }
    let api = ApiClient::from_config(&config.llm, api_key);
    log::info!("Using model {} at {}", api.model(), api.endpoint());
    let client: Arc<dyn CompletionClient> = Arc::new(api);

    // 5. Tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::from(1);
        }
    };

    // 6. Phases
    if matches!(command, Command::All | Command::Lectures) {
        match rt.block_on(run_lecture_phase(&config, Arc::clone(&client))) {
            Ok(report) => {
                print_lecture_report(&report);
                if !report.succeeded() {
                    eprintln!("{}", phase_failure("lecture generation", &report.failed));
                    return ExitCode::from(1);
                }
            }
            Err(e) => {
                eprintln!("Error running lecture generation: {e:#}");
                return ExitCode::from(1);
            }
        }
    }

    if matches!(command, Command::All | Command::Intros) {
        match rt.block_on(run_intro_phase(&config, Arc::clone(&client))) {
            Ok(report) => {
                print_intro_report(&report);
                if !report.succeeded() {
                    eprintln!(
                        "{}",
                        phase_failure("intro/conclusion generation", &report.failed)
                    );
                    return ExitCode::from(1);
                }
            }
            Err(e) => {
                eprintln!("Error running intro/conclusion generation: {e:#}");
                return ExitCode::from(1);
            }
        }
    }

    println!("\nAll lectures, intros, and conclusions generated successfully.");
    ExitCode::SUCCESS
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn phase_failure_names_every_failed_module() {
        let failed = vec!["Memory".to_string(), "Traits".to_string()];
        assert_eq!(
            phase_failure("lecture generation", &failed),
            "Error running lecture generation: 2 module(s) failed: Memory, Traits"
        );
    }

    #[test]
    fn failed_module_marks_phase_unsuccessful() {
        let report = LecturePhaseReport {
            modules: vec![],
            failed: vec!["Broken".into()],
        };
        assert!(!report.succeeded());
        assert!(LecturePhaseReport::default().succeeded());

        let intros = IntroPhaseReport {
            modules: vec![],
            failed: vec!["Broken".into()],
        };
        assert!(!intros.succeeded());
    }

    #[test]
    fn init_config_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        assert!(init_config(&path).unwrap());
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.llm.model, "gpt-4.1");

        std::fs::write(&path, "[llm]\nmodel = \"custom\"\n").unwrap();
        assert!(!init_config(&path).unwrap());
        assert_eq!(AppConfig::load_from(&path).unwrap().llm.model, "custom");
    }

    #[test]
    fn subcommands_parse() {
        let args = Args::parse_from(["lecture-writer", "--max-concurrent-modules", "2", "intros"]);
        assert_eq!(args.command, Some(Command::Intros));
        assert_eq!(args.max_concurrent_modules, Some(2));

        let args = Args::parse_from(["lecture-writer", "init-config"]);
        assert_eq!(args.command, Some(Command::InitConfig));
    }
}

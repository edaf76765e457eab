//! Generation pipeline for lecture scripts and their bookends.
//!
//! # Architecture
//!
//! ```text
//! run_lecture_phase
//!   └─ ModuleOrchestrator            (modules concurrently, bounded)
//!        └─ per module, in order
//!             └─ LecturePipeline     Research → Structure → Draft → Stylize → FactCheck
//!
//! run_intro_phase
//!   └─ CourseOrchestrator            course intro, module bookends, course conclusion
//! ```
//!
//! Every completion goes through [`FallbackClient`](crate::llm::FallbackClient):
//! a failed call becomes a `[ERROR: Could not …]` placeholder and the
//! pipeline keeps going.  Only filesystem errors abort a module.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lecture_writer::config::AppConfig;
//! use lecture_writer::llm::ApiClient;
//! use lecture_writer::pipeline::{run_intro_phase, run_lecture_phase};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let key = config.resolve_api_key()?;
//!     let client = Arc::new(ApiClient::from_config(&config.llm, key));
//!
//!     run_lecture_phase(&config, client.clone()).await?;
//!     run_intro_phase(&config, client).await?;
//!     Ok(())
//! }
//! ```

pub mod course;
pub mod lecture;
pub mod module;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use course::{resolve_directory, CourseOrchestrator, IntroPhaseReport, ModuleBookends};
pub use lecture::{LecturePipeline, LectureScript, PipelineContext};
pub use module::{LectureEntry, LecturePhaseReport, ModuleOrchestrator, ModuleReport};
pub use runner::{run_intro_phase, run_lecture_phase};
pub use state::{CorrectionStatus, LectureStage, BOOKEND_TEMPERATURE, SUMMARY_TEMPERATURE};

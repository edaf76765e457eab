//! Lecture script generation from a course dataset.
//!
//! * [`config`]: settings file, input/output locations, API key lookup.
//! * [`course`]: dataset records, module grouping, naming and output tree.
//! * [`llm`]: chat-completion client, placeholder fallback, fact-check parsing.
//! * [`prompt`]: prompt templates for every generation step.
//! * [`pipeline`]: the lecture and intro phases.

pub mod config;
pub mod course;
pub mod llm;
pub mod pipeline;
pub mod prompt;

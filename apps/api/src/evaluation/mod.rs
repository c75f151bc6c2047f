//! The resume-evaluation pipeline: rule-aware prompt assembly, one
//! schema-constrained gateway call, and a local fallback scorer for
//! gateway outages.

pub mod evaluator;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompt_builder;
pub mod prompts;
pub mod schema;

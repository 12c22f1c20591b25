//! graphqa-eval: Judge-scored evaluation of the answer pipeline.
//!
//! Drives every reference question through one pipeline instance, scores
//! the answers with an LLM judge, and reports per-label counts and the
//! mean score. Failures inside a question never abort the run.

pub mod config;
pub mod dataset;
pub mod error;
pub mod harness;
pub mod report;

pub use config::EvalConfig;
pub use dataset::{load_questions, ReferenceQuestion};
pub use error::EvalError;
pub use harness::{EvaluationRun, EvaluationSummary, Evaluator};

//! graphqa-rag: Question answering over a property graph.
//!
//! Builds the schema grounding once, then for each question asks for a
//! Cypher query, runs it, and asks for an answer written from the
//! serialized rows.

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{connect, AnswerPipeline, GeminiPipeline};

//! Error types for the graphqa-rag crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Graph backend unavailable")]
    Backend(#[source] graphqa_graph::GraphError),

    #[error("Schema introspection failed")]
    Introspection(#[source] graphqa_graph::GraphError),

    #[error("Query execution failed")]
    Execution(#[source] graphqa_graph::GraphError),

    #[error("Generation service failed")]
    Generation(#[from] graphqa_llm::LlmError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

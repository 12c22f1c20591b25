//! Capability interfaces for the external text generation services.

use async_trait::async_trait;
use graphqa_core::Judgement;

use crate::client::LlmError;

/// Translates a question into a graph query.
#[async_trait]
pub trait QueryGenerator: Send + Sync {
    /// Returns `None` when the question cannot be answered from the schema.
    async fn generate_query(
        &self,
        grounding: &str,
        question: &str,
    ) -> Result<Option<String>, LlmError>;
}

/// Writes the final answer from serialized query results.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    /// The returned text may be empty.
    async fn synthesize_answer(&self, question: &str, result_text: &str)
        -> Result<String, LlmError>;
}

/// Scores a produced answer against a reference answer.
#[async_trait]
pub trait Judge: Send + Sync {
    async fn judge(
        &self,
        question: &str,
        reference: &str,
        produced: &str,
    ) -> Result<Judgement, LlmError>;
}

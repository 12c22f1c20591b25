//! The answer pipeline: grounding → query → rows → answer.

use graphqa_core::PipelineOutcome;
use graphqa_graph::{execute_query, introspect_schema, GraphBackend, GraphClient, GraphConfig};
use graphqa_llm::{AnswerSynthesizer, GeminiClient, LlmConfig, QueryGenerator};

use crate::error::{PipelineError, Result};

/// The production pipeline: Neo4j backend, Gemini for both generation steps.
pub type GeminiPipeline = AnswerPipeline<GraphClient, GeminiClient, GeminiClient>;

/// Question-to-answer pipeline over one read-only graph backend.
///
/// The grounding text is computed once at construction and reused for
/// every question.
pub struct AnswerPipeline<B, G, S> {
    backend: B,
    generator: G,
    synthesizer: S,
    grounding: String,
}

impl<B, G, S> AnswerPipeline<B, G, S>
where
    B: GraphBackend,
    G: QueryGenerator,
    S: AnswerSynthesizer,
{
    /// Introspect the backend and cache the grounding text.
    pub async fn new(backend: B, generator: G, synthesizer: S) -> Result<Self> {
        let schema = introspect_schema(&backend)
            .await
            .map_err(PipelineError::Introspection)?;
        let grounding = schema.to_grounding_text();
        tracing::info!(chars = grounding.len(), "Grounding text cached");

        Ok(Self {
            backend,
            generator,
            synthesizer,
            grounding,
        })
    }

    pub fn grounding(&self) -> &str {
        &self.grounding
    }

    /// Answer one question. Single shot: no retries, no fallback query.
    pub async fn run(&self, question: &str) -> Result<PipelineOutcome> {
        let Some(query) = self
            .generator
            .generate_query(&self.grounding, question)
            .await?
        else {
            return Ok(PipelineOutcome::unanswerable(question));
        };

        let answered = execute_query(&self.backend, question, &query)
            .await
            .map_err(PipelineError::Execution)?;
        let result_text = answered.result.to_prompt_text();
        tracing::debug!(rows = answered.result.len(), "Serialized query result");

        let answer = self
            .synthesizer
            .synthesize_answer(question, &result_text)
            .await?;

        Ok(PipelineOutcome::answered(question, query, answer))
    }
}

/// Connect to Neo4j and Gemini and build the production pipeline.
pub async fn connect(graph: &GraphConfig, llm: &LlmConfig) -> Result<GeminiPipeline> {
    let gemini = GeminiClient::new(llm)?;
    let client = GraphClient::connect(graph)
        .await
        .map_err(PipelineError::Backend)?;
    AnswerPipeline::new(client, gemini.clone(), gemini).await
}

//! Query generation and answer synthesis on top of [`GeminiClient`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{strip_code_fences, GeminiClient, LlmError, ResponseFormat};
use crate::prompts;
use crate::services::{AnswerSynthesizer, QueryGenerator};

#[derive(Debug, Deserialize)]
struct GeneratedQuery {
    #[serde(default)]
    query: Option<String>,
}

/// Read the `{"query": ...}` object returned by query generation.
///
/// A null or blank query means the model declined to answer.
pub fn parse_generated_query(raw: &str) -> Result<Option<String>, LlmError> {
    let parsed: GeneratedQuery = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| LlmError::MalformedResponse(format!("{e}: {raw}")))?;

    Ok(parsed
        .query
        .map(|q| strip_code_fences(&q).to_string())
        .filter(|q| !q.is_empty()))
}

#[async_trait]
impl QueryGenerator for GeminiClient {
    async fn generate_query(
        &self,
        grounding: &str,
        question: &str,
    ) -> Result<Option<String>, LlmError> {
        let prompt = prompts::text2cypher(grounding, question);
        let raw = self
            .generate(&self.query_model, &prompt, ResponseFormat::Json)
            .await?;
        let query = parse_generated_query(&raw)?;

        match &query {
            Some(q) => tracing::info!(question, query = %q, "Generated query"),
            None => tracing::info!(question, "Model declined to generate a query"),
        }
        Ok(query)
    }
}

#[async_trait]
impl AnswerSynthesizer for GeminiClient {
    async fn synthesize_answer(
        &self,
        question: &str,
        result_text: &str,
    ) -> Result<String, LlmError> {
        let prompt = prompts::answer_question(question, result_text);
        self.generate(&self.answer_model, &prompt, ResponseFormat::Text)
            .await
    }
}

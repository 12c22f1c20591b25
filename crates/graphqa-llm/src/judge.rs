//! LLM judge: rubric request plus tolerant response parsing.

use async_trait::async_trait;
use graphqa_core::{Judgement, Score};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{strip_code_fences, GeminiClient, LlmError, ResponseFormat};
use crate::prompts;
use crate::services::Judge;

#[derive(Debug, Deserialize)]
struct Verdict {
    score: Value,
    #[serde(default)]
    reasoning: Value,
}

/// Turn a raw judge response into a score, never failing.
///
/// In order of precedence:
/// 1. a `{"score", "reasoning"}` object whose score is an integer in 1..=5
/// 2. the first character `1`..=`5` in the raw text, with the raw text as reasoning
/// 3. score 1 with a reasoning that embeds the raw text
pub fn parse_judgement(raw: &str) -> Judgement {
    if let Some(judgement) = parse_structured(raw) {
        return judgement;
    }

    let first_digit = raw
        .chars()
        .filter_map(|c| c.to_digit(10))
        .find(|d| (1..=5).contains(d));
    if let Some(score) = first_digit.and_then(|d| Score::new(i64::from(d)).ok()) {
        tracing::warn!(score = %score, "Judge response was not structured; used first digit");
        return Judgement::new(score, raw);
    }

    tracing::warn!("Judge response could not be parsed");
    Judgement::no_answer(format!("Could not parse judge response: {raw}"))
}

fn parse_structured(raw: &str) -> Option<Judgement> {
    let verdict: Verdict = serde_json::from_str(strip_code_fences(raw)).ok()?;

    let score = match &verdict.score {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    let score = Score::new(score).ok()?;

    let reasoning = match verdict.reasoning {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    };
    Some(Judgement::new(score, reasoning))
}

#[async_trait]
impl Judge for GeminiClient {
    async fn judge(
        &self,
        question: &str,
        reference: &str,
        produced: &str,
    ) -> Result<Judgement, LlmError> {
        let prompt = prompts::judge(question, reference, produced);
        let raw = match self
            .generate(&self.judge_model, &prompt, ResponseFormat::Json)
            .await
        {
            Ok(text) => text,
            // A candidate-less reply is a malformed verdict, not a transport failure.
            Err(LlmError::EmptyResponse { .. }) => String::new(),
            Err(e) => return Err(e),
        };
        Ok(parse_judgement(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphqa_core::ScoreLabel;

    #[test]
    fn test_structured_response_is_used_directly() {
        let j = parse_judgement(r#"{"score": 5, "reasoning": "matches"}"#);
        assert_eq!(j.score.value(), 5);
        assert_eq!(j.score.label(), ScoreLabel::Correct);
        assert_eq!(j.reasoning, "matches");
    }

    #[test]
    fn test_structured_score_variants() {
        assert_eq!(parse_judgement(r#"{"score": "3", "reasoning": "r"}"#).score.value(), 3);
        assert_eq!(parse_judgement(r#"{"score": 2.0}"#).score.value(), 2);
        assert_eq!(parse_judgement(r#"{"score": 2.0}"#).reasoning, "");
        assert_eq!(
            parse_judgement("```json\n{\"score\": 4, \"reasoning\": \"ok\"}\n```").reasoning,
            "ok"
        );
    }

    #[test]
    fn test_unstructured_text_uses_first_digit_in_range() {
        let raw = "I would rate this a 4 out of 5.";
        let j = parse_judgement(raw);
        assert_eq!(j.score.value(), 4);
        assert_eq!(j.reasoning, raw);
    }

    #[test]
    fn test_digits_outside_range_are_skipped() {
        let raw = "Score 0/9... final: 3";
        assert_eq!(parse_judgement(raw).score.value(), 3);
    }

    #[test]
    fn test_out_of_range_structured_score_falls_through() {
        let raw = r#"{"score": 7, "reasoning": "generous 2"}"#;
        let j = parse_judgement(raw);
        assert_eq!(j.score.value(), 2);
        assert_eq!(j.reasoning, raw);
    }

    #[test]
    fn test_unparseable_response_defaults_to_minimum() {
        let j = parse_judgement("no idea");
        assert_eq!(j.score.value(), 1);
        assert_eq!(j.score.label(), ScoreLabel::NoAnswer);
        assert_eq!(j.reasoning, "Could not parse judge response: no idea");

        let empty = parse_judgement("");
        assert_eq!(empty.score.value(), 1);
        assert_eq!(empty.reasoning, "Could not parse judge response: ");
    }
}

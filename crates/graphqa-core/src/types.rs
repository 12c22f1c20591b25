//! Pipeline outcomes, judge scores, and evaluation records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Placeholder for a query or answer that was intentionally not produced.
pub const NOT_AVAILABLE: &str = "N/A";

// ── Pipeline ──────────────────────────────────────────────────────

/// The result of running one question through the answer pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub question: String,
    /// Generated query text, or [`NOT_AVAILABLE`].
    #[serde(rename = "cypher")]
    pub query: String,
    /// Synthesized answer text, or [`NOT_AVAILABLE`].
    #[serde(rename = "response")]
    pub answer: String,
}

impl PipelineOutcome {
    pub fn answered(
        question: impl Into<String>,
        query: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            query: query.into(),
            answer: answer.into(),
        }
    }

    /// Outcome for a question the query generator declined to translate.
    pub fn unanswerable(question: impl Into<String>) -> Self {
        Self::answered(question, NOT_AVAILABLE, NOT_AVAILABLE)
    }

    /// True when there is no usable answer text.
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty() || self.answer == NOT_AVAILABLE
    }
}

// ── Scoring ───────────────────────────────────────────────────────

/// Judge rubric label. Discriminants are the scores they stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    NoAnswer = 1,
    Wrong = 2,
    Partial = 3,
    Acceptable = 4,
    Correct = 5,
}

impl ScoreLabel {
    /// All labels in score order.
    pub const ALL: [ScoreLabel; 5] = [
        Self::NoAnswer,
        Self::Wrong,
        Self::Partial,
        Self::Acceptable,
        Self::Correct,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoAnswer => "no_answer",
            Self::Wrong => "wrong",
            Self::Partial => "partial",
            Self::Acceptable => "acceptable",
            Self::Correct => "correct",
        }
    }

    pub fn score(self) -> Score {
        Score(self as u8)
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A judge score, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(1);
    pub const MAX: Score = Score(5);

    pub fn new(value: i64) -> Result<Self, CoreError> {
        match value {
            1..=5 => Ok(Score(value as u8)),
            _ => Err(CoreError::InvalidScore(value)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> ScoreLabel {
        ScoreLabel::ALL[usize::from(self.0 - 1)]
    }
}

impl TryFrom<i64> for Score {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A judge's verdict on one produced answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub score: Score,
    pub reasoning: String,
}

impl Judgement {
    pub fn new(score: Score, reasoning: impl Into<String>) -> Self {
        Self {
            score,
            reasoning: reasoning.into(),
        }
    }

    /// Minimum score with an explanation; used wherever no answer exists.
    pub fn no_answer(reasoning: impl Into<String>) -> Self {
        Self::new(Score::MIN, reasoning)
    }
}

// ── Evaluation ────────────────────────────────────────────────────

/// One question's full evaluation trace.
///
/// Serialized field names form the stable artifact format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// 1-based row ordinal in the reference dataset.
    pub id: usize,
    pub question: String,
    #[serde(rename = "baseline")]
    pub reference_answer: String,
    #[serde(rename = "cypher")]
    pub generated_query: String,
    #[serde(rename = "response")]
    pub produced_answer: String,
    pub score: Score,
    pub label: ScoreLabel,
    pub reasoning: String,
    /// Full error chain when the pipeline failed.
    #[serde(rename = "error")]
    pub failure_detail: Option<String>,
}

impl EvaluationRecord {
    /// Build a record; the label is always derived from the score.
    pub fn new(
        id: usize,
        question: impl Into<String>,
        reference_answer: impl Into<String>,
        generated_query: impl Into<String>,
        produced_answer: impl Into<String>,
        judgement: Judgement,
        failure_detail: Option<String>,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            reference_answer: reference_answer.into(),
            generated_query: generated_query.into(),
            produced_answer: produced_answer.into(),
            score: judgement.score,
            label: judgement.score.label(),
            reasoning: judgement.reasoning,
            failure_detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label_mapping() {
        let expected = [
            (1, "no_answer"),
            (2, "wrong"),
            (3, "partial"),
            (4, "acceptable"),
            (5, "correct"),
        ];
        for (value, name) in expected {
            let score = Score::new(value).unwrap();
            assert_eq!(score.label().as_str(), name);
            assert_eq!(score.label().score(), score);
        }
    }

    #[test]
    fn test_score_rejects_out_of_range() {
        assert!(matches!(Score::new(0), Err(CoreError::InvalidScore(0))));
        assert!(matches!(Score::new(6), Err(CoreError::InvalidScore(6))));
        assert!(serde_json::from_str::<Score>("9").is_err());
        assert_eq!(serde_json::from_str::<Score>("4").unwrap(), Score::new(4).unwrap());
    }

    #[test]
    fn test_unanswerable_outcome_uses_sentinel() {
        let outcome = PipelineOutcome::unanswerable("Who?");
        assert_eq!(outcome.query, NOT_AVAILABLE);
        assert_eq!(outcome.answer, NOT_AVAILABLE);
        assert!(outcome.is_empty());
        assert!(PipelineOutcome::answered("Who?", "MATCH (n) RETURN n", "").is_empty());
        assert!(!PipelineOutcome::answered("Who?", "MATCH (n) RETURN n", "Ada").is_empty());
    }

    #[test]
    fn test_record_serializes_with_artifact_keys() {
        let record = EvaluationRecord::new(
            3,
            "Qui a parlé?",
            "Zoë",
            "MATCH (p:Person) RETURN p.name",
            "Zoë a parlé.",
            Judgement::new(Score::new(4).unwrap(), "close"),
            None,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["baseline"], "Zoë");
        assert_eq!(value["cypher"], "MATCH (p:Person) RETURN p.name");
        assert_eq!(value["response"], "Zoë a parlé.");
        assert_eq!(value["score"], 4);
        assert_eq!(value["label"], "acceptable");
        assert_eq!(value["reasoning"], "close");
        assert!(value["error"].is_null());
    }
}

//! The evaluation loop and its aggregate statistics.

use std::collections::BTreeMap;
use std::path::Path;

use graphqa_core::{EvaluationRecord, Judgement, ScoreLabel};
use graphqa_graph::GraphBackend;
use graphqa_llm::{AnswerSynthesizer, Judge, QueryGenerator};
use graphqa_rag::AnswerPipeline;
use serde::Serialize;

use crate::dataset::ReferenceQuestion;
use crate::error::Result;

const NO_RESPONSE: &str = "No response returned";

/// Aggregate scores of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub total: usize,
    /// Arithmetic mean over all records; 0 for an empty run.
    pub mean_score: f64,
    /// Every label is present, zero counts included.
    pub label_counts: BTreeMap<ScoreLabel, usize>,
}

impl EvaluationSummary {
    pub fn from_records(records: &[EvaluationRecord]) -> Self {
        let mut label_counts: BTreeMap<ScoreLabel, usize> =
            ScoreLabel::ALL.iter().map(|label| (*label, 0)).collect();
        for record in records {
            *label_counts.entry(record.label).or_insert(0) += 1;
        }

        let total = records.len();
        let mean_score = if total == 0 {
            0.0
        } else {
            let sum: u32 = records.iter().map(|r| u32::from(r.score.value())).sum();
            f64::from(sum) / total as f64
        };

        Self {
            total,
            mean_score,
            label_counts,
        }
    }

    pub fn count(&self, label: ScoreLabel) -> usize {
        self.label_counts.get(&label).copied().unwrap_or(0)
    }
}

/// Records of one run in input order, with their summary.
#[derive(Debug, Clone)]
pub struct EvaluationRun {
    pub records: Vec<EvaluationRecord>,
    pub summary: EvaluationSummary,
}

impl EvaluationRun {
    /// Write all records as a pretty-printed JSON array.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), records = self.records.len(), "Evaluation records saved");
        Ok(())
    }
}

/// Scores pipeline answers with a judge, one question at a time.
///
/// Owns the single pipeline instance used for the whole run.
pub struct Evaluator<B, G, S, J> {
    pipeline: AnswerPipeline<B, G, S>,
    judge: J,
}

impl<B, G, S, J> Evaluator<B, G, S, J>
where
    B: GraphBackend,
    G: QueryGenerator,
    S: AnswerSynthesizer,
    J: Judge,
{
    pub fn new(pipeline: AnswerPipeline<B, G, S>, judge: J) -> Self {
        Self { pipeline, judge }
    }

    /// Evaluate every question sequentially.
    ///
    /// `on_record` sees each record as soon as it is complete.
    pub async fn run(
        &self,
        questions: &[ReferenceQuestion],
        mut on_record: impl FnMut(&EvaluationRecord),
    ) -> EvaluationRun {
        let mut records = Vec::with_capacity(questions.len());
        for question in questions {
            let record = self.evaluate(question).await;
            tracing::info!(
                question_id = record.id,
                score = %record.score,
                label = %record.label,
                "Question evaluated"
            );
            on_record(&record);
            records.push(record);
        }

        let summary = EvaluationSummary::from_records(&records);
        tracing::info!(
            total = summary.total,
            mean_score = summary.mean_score,
            "Evaluation finished"
        );
        EvaluationRun { records, summary }
    }

    /// Evaluate one question. Never fails: errors become a minimum score.
    pub async fn evaluate(&self, reference: &ReferenceQuestion) -> EvaluationRecord {
        let record = |query: &str, answer: &str, judgement: Judgement, failure| {
            EvaluationRecord::new(
                reference.id,
                &reference.question,
                &reference.reference_answer,
                query,
                answer,
                judgement,
                failure,
            )
        };

        let outcome = match self.pipeline.run(&reference.question).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let (reasoning, detail) = describe_failure(e);
                tracing::warn!(question_id = reference.id, error = %detail, "Pipeline failed");
                return record("", "", Judgement::no_answer(reasoning), Some(detail));
            }
        };

        if outcome.is_empty() {
            return record(
                &outcome.query,
                &outcome.answer,
                Judgement::no_answer(NO_RESPONSE),
                None,
            );
        }

        match self
            .judge
            .judge(
                &reference.question,
                &reference.reference_answer,
                &outcome.answer,
            )
            .await
        {
            Ok(judgement) => record(&outcome.query, &outcome.answer, judgement, None),
            Err(e) => {
                let (reasoning, detail) = describe_failure(e);
                tracing::warn!(question_id = reference.id, error = %detail, "Judge failed");
                record(
                    &outcome.query,
                    &outcome.answer,
                    Judgement::no_answer(reasoning),
                    Some(detail),
                )
            }
        }
    }
}

/// Reasoning from the innermost cause, plus the full error chain.
fn describe_failure<E>(error: E) -> (String, String)
where
    E: std::error::Error + Send + Sync + 'static,
{
    let error = anyhow::Error::new(error);
    let reasoning = format!("Error: {}", error.root_cause());
    (reasoning, format!("{error:#}"))
}

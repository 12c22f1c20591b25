//! Reference dataset loading.

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One benchmark question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceQuestion {
    /// 1-based position of the row in the dataset, skipped rows included.
    pub id: usize,
    pub question: String,
    pub reference_answer: String,
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "Question", default)]
    question: String,
    #[serde(rename = "Baseline answer", default)]
    baseline: String,
}

/// Load reference questions from a CSV file.
pub fn load_questions(path: &Path) -> Result<Vec<ReferenceQuestion>> {
    let file = std::fs::File::open(path)?;
    let questions = read_questions(file)?;
    tracing::info!(
        path = %path.display(),
        count = questions.len(),
        "Loaded reference questions"
    );
    Ok(questions)
}

/// Parse reference questions; rows with an empty question are skipped.
pub fn read_questions<R: io::Read>(input: R) -> Result<Vec<ReferenceQuestion>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let mut questions = Vec::new();
    for (index, row) in reader.deserialize::<DatasetRow>().enumerate() {
        let row = row?;
        let question = row.question.trim();
        if question.is_empty() {
            continue;
        }
        questions.push(ReferenceQuestion {
            id: index + 1,
            question: question.to_string(),
            reference_answer: row.baseline.trim().to_string(),
        });
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_rows_are_trimmed_and_numbered_from_one() {
        let csv = "Question,Baseline answer,Notes\n  Who gave the keynote?  , Jane Doe ,x\nWhere was it?,Berlin,\n";
        let questions = read_questions(csv.as_bytes()).unwrap();
        assert_eq!(
            questions,
            vec![
                ReferenceQuestion {
                    id: 1,
                    question: "Who gave the keynote?".to_string(),
                    reference_answer: "Jane Doe".to_string(),
                },
                ReferenceQuestion {
                    id: 2,
                    question: "Where was it?".to_string(),
                    reference_answer: "Berlin".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_questions_are_skipped_but_keep_ordinals() {
        let csv = "Question,Baseline answer\nFirst?,a\n   ,b\nThird?,c\n";
        let questions = read_questions(csv.as_bytes()).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_missing_baseline_column_yields_empty_reference() {
        let csv = "Question\nOnly a question?\n";
        let questions = read_questions(csv.as_bytes()).unwrap();
        assert_eq!(questions[0].reference_answer, "");
    }

    #[test]
    fn test_quoted_multiline_answers_and_unicode() {
        let csv = "Question,Baseline answer\n\"Qui a parlé, et quand?\",\"Zoë\nen 2021\"\n";
        let questions = read_questions(csv.as_bytes()).unwrap();
        assert_eq!(questions[0].question, "Qui a parlé, et quand?");
        assert_eq!(questions[0].reference_answer, "Zoë\nen 2021");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.csv");
        std::fs::write(&path, "Question,Baseline answer\nWho?,Ada\n").unwrap();
        let questions = load_questions(&path).unwrap();
        assert_eq!(questions.len(), 1);
        assert!(matches!(
            load_questions(&dir.path().join("missing.csv")),
            Err(EvalError::Io(_))
        ));

        std::fs::write(&path, b"Question,Baseline answer\n\xff\xfe?,x\n").unwrap();
        assert!(matches!(load_questions(&path), Err(EvalError::Dataset(_))));
    }
}

//! Console rendering of evaluation progress and the final summary.

use graphqa_core::{EvaluationRecord, ScoreLabel};

use crate::harness::EvaluationSummary;

const QUESTION_WIDTH: usize = 55;
const RULE_WIDTH: usize = 80;

/// Banner printed before the first question.
pub fn progress_header(total: usize) -> String {
    format!(
        "Evaluating {total} questions\n\n{:<5}{:<11}{:<13}Question\n{}",
        "Q",
        "Score",
        "Label",
        "-".repeat(RULE_WIDTH)
    )
}

/// One line per evaluated question.
pub fn progress_line(record: &EvaluationRecord) -> String {
    format!(
        "Q{:<3} {}/5       {:<12} {}",
        record.id,
        record.score,
        record.label.as_str(),
        truncate(&record.question, QUESTION_WIDTH)
    )
}

pub fn render_summary(summary: &EvaluationSummary) -> String {
    let mut lines = vec![
        "=".repeat(RULE_WIDTH),
        format!(
            "SUMMARY - {} questions | avg score: {:.1}/5",
            summary.total, summary.mean_score
        ),
        "-".repeat(40),
    ];
    for label in ScoreLabel::ALL {
        let count = summary.count(label);
        lines.push(format!(
            "  {} {:<12} {:>2}  {}",
            label.score(),
            label.as_str(),
            count,
            "█".repeat(count)
        ));
    }
    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let head: String = text.chars().take(width).collect();
    format!("{head}...")
}

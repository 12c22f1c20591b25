//! Query results and their flat text serialization.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One result row; values are positional and aligned to the columns.
pub type Row = Vec<Value>;

/// The deduplicated result of a single graph query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    /// Build a result from raw backend rows.
    ///
    /// A row equal (position by position) to an earlier row is dropped;
    /// the order of first occurrences is kept.
    pub fn from_rows(columns: Vec<String>, rows: impl IntoIterator<Item = Row>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for row in rows {
            if seen.insert(row_key(&row)) {
                unique.push(row);
            }
        }
        Self {
            columns,
            rows: unique,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize into the flat text handed to answer synthesis.
    ///
    /// - no rows: empty string
    /// - one column: values joined with `", "`
    /// - otherwise: one line per row of `col: value` pairs joined with
    ///   `" | "`, null values omitted
    pub fn to_prompt_text(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        if self.columns.len() == 1 {
            return self
                .rows
                .iter()
                .map(|row| row.first().map(render_value).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ");
        }

        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .filter(|(_, value)| !value.is_null())
                    .map(|(column, value)| format!("{column}: {}", render_value(value)))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A query result paired with the question that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredQuery {
    pub question: String,
    pub result: QueryResult,
}

/// Render a single value; strings are written without quotes.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Compact JSON is a faithful identity for a row: object keys are ordered.
fn row_key(row: &[Value]) -> String {
    Value::Array(row.to_vec()).to_string()
}

//! Single-shot execution of generated queries.

use graphqa_core::{AnsweredQuery, QueryResult};

use crate::backend::GraphBackend;
use crate::client::GraphError;

/// Run `query` once and return its deduplicated rows.
///
/// `question` only labels the result. A rejected query is returned as an
/// error; no partial result is produced.
pub async fn execute_query<B>(
    backend: &B,
    question: &str,
    query: &str,
) -> Result<AnsweredQuery, GraphError>
where
    B: GraphBackend + ?Sized,
{
    let raw = backend.execute(query).await?;
    let fetched = raw.rows.len();
    let result = QueryResult::from_rows(raw.columns, raw.rows);

    tracing::debug!(
        question,
        fetched,
        unique = result.len(),
        "Executed generated query"
    );

    Ok(AnsweredQuery {
        question: question.to_string(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::backend::{ColumnInfo, RawResult, RelTable, TableKind};

    enum Canned {
        Rows(RawResult),
        Fails,
    }

    #[async_trait]
    impl GraphBackend for Canned {
        async fn node_tables(&self) -> Result<Vec<String>, GraphError> {
            Ok(Vec::new())
        }

        async fn rel_tables(&self) -> Result<Vec<RelTable>, GraphError> {
            Ok(Vec::new())
        }

        async fn table_info(
            &self,
            table: &str,
            _kind: TableKind,
        ) -> Result<Vec<ColumnInfo>, GraphError> {
            Err(GraphError::UnknownTable(table.to_string()))
        }

        async fn execute(&self, _query: &str) -> Result<RawResult, GraphError> {
            match self {
                Canned::Rows(raw) => Ok(raw.clone()),
                Canned::Fails => Err(GraphError::Timeout { seconds: 30 }),
            }
        }
    }

    #[tokio::test]
    async fn test_rows_are_deduplicated_in_backend_order() {
        let backend = Canned::Rows(RawResult {
            columns: vec!["name".to_string(), "n".to_string()],
            rows: vec![
                vec![json!("a"), json!(1)],
                vec![json!("b"), json!(2)],
                vec![json!("a"), json!(1)],
            ],
        });

        let answered = execute_query(&backend, "Which?", "MATCH (x) RETURN x.name AS name, x.n AS n")
            .await
            .unwrap();

        assert_eq!(answered.question, "Which?");
        assert_eq!(answered.result.columns(), &["name", "n"]);
        assert_eq!(
            answered.result.rows(),
            &[vec![json!("a"), json!(1)], vec![json!("b"), json!(2)]]
        );
        assert_eq!(answered.result.to_prompt_text(), "name: a | n: 1\nname: b | n: 2");
    }

    #[tokio::test]
    async fn test_execution_error_propagates() {
        let err = execute_query(&Canned::Fails, "Which?", "MATCH (x:Gone) RETURN x")
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Timeout { seconds: 30 }));
    }
}

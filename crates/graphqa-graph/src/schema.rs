//! Schema introspection: ask the backend for its own structure.

use std::collections::HashMap;

use graphqa_core::{EdgeType, GraphSchema, NodeType, Property};

use crate::backend::{GraphBackend, TableKind};
use crate::client::GraphError;

/// Fetch every node and relationship table with its properties.
///
/// Errors propagate: a schema is a precondition for building a pipeline.
pub async fn introspect_schema<B>(backend: &B) -> Result<GraphSchema, GraphError>
where
    B: GraphBackend + ?Sized,
{
    let mut nodes = Vec::new();
    for label in backend.node_tables().await? {
        let properties = fetch_properties(backend, &label, TableKind::Node).await?;
        nodes.push(NodeType::new(label, properties));
    }

    // A relationship type connecting several label pairs shares one table.
    let mut rel_properties: HashMap<String, Vec<Property>> = HashMap::new();
    let mut edges = Vec::new();
    for rel in backend.rel_tables().await? {
        let properties = match rel_properties.get(&rel.name) {
            Some(cached) => cached.clone(),
            None => {
                let fetched = fetch_properties(backend, &rel.name, TableKind::Relationship).await?;
                rel_properties.insert(rel.name.clone(), fetched.clone());
                fetched
            }
        };
        edges.push(EdgeType::new(rel.name, rel.source, rel.destination, properties));
    }

    tracing::info!(
        nodes = nodes.len(),
        edges = edges.len(),
        "Introspected graph schema"
    );
    Ok(GraphSchema::new(nodes, edges))
}

async fn fetch_properties<B>(
    backend: &B,
    table: &str,
    kind: TableKind,
) -> Result<Vec<Property>, GraphError>
where
    B: GraphBackend + ?Sized,
{
    let columns = backend.table_info(table, kind).await?;
    Ok(columns
        .into_iter()
        .map(|c| Property::new(c.name, c.declared_type))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::backend::{ColumnInfo, RawResult, RelTable};
    use crate::backend::TableKind::{Node, Relationship};

    struct SchemaOnlyBackend {
        node_tables: Vec<&'static str>,
        rel_tables: Vec<(&'static str, &'static str, &'static str)>,
        columns: Vec<(TableKind, &'static str, Vec<(&'static str, &'static str)>)>,
        table_info_calls: AtomicUsize,
    }

    impl SchemaOnlyBackend {
        fn conference() -> Self {
            Self {
                node_tables: vec!["Talk", "Person", "Event"],
                rel_tables: vec![
                    ("PART_OF", "Talk", "Event"),
                    ("GAVE_TALK", "Person", "Talk"),
                    ("ATTENDED", "Person", "Event"),
                    ("ATTENDED", "Person", "Talk"),
                ],
                columns: vec![
                    (Node, "Talk", vec![("title", "STRING"), ("description", "STRING")]),
                    (Node, "Person", vec![("name", "STRING")]),
                    (Node, "Event", vec![("year", "INT64"), ("name", "STRING")]),
                    (Relationship, "GAVE_TALK", vec![("role", "STRING")]),
                    (Relationship, "PART_OF", vec![]),
                    (Relationship, "ATTENDED", vec![]),
                ],
                table_info_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GraphBackend for SchemaOnlyBackend {
        async fn node_tables(&self) -> Result<Vec<String>, GraphError> {
            Ok(self.node_tables.iter().map(|s| s.to_string()).collect())
        }

        async fn rel_tables(&self) -> Result<Vec<RelTable>, GraphError> {
            Ok(self
                .rel_tables
                .iter()
                .map(|(name, source, destination)| RelTable {
                    name: name.to_string(),
                    source: source.to_string(),
                    destination: destination.to_string(),
                })
                .collect())
        }

        async fn table_info(
            &self,
            table: &str,
            kind: TableKind,
        ) -> Result<Vec<ColumnInfo>, GraphError> {
            self.table_info_calls.fetch_add(1, Ordering::SeqCst);
            let (_, _, cols) = self
                .columns
                .iter()
                .find(|(k, name, _)| *k == kind && *name == table)
                .ok_or_else(|| GraphError::UnknownTable(table.to_string()))?;
            Ok(cols
                .iter()
                .enumerate()
                .map(|(ordinal, (name, ty))| ColumnInfo {
                    ordinal,
                    name: name.to_string(),
                    declared_type: ty.to_string(),
                })
                .collect())
        }

        async fn execute(&self, _query: &str) -> Result<RawResult, GraphError> {
            Ok(RawResult::default())
        }
    }

    #[tokio::test]
    async fn test_introspection_is_sorted_and_deterministic() {
        let backend = SchemaOnlyBackend::conference();
        let first = introspect_schema(&backend).await.unwrap();
        let second = introspect_schema(&backend).await.unwrap();
        assert_eq!(first.to_grounding_text(), second.to_grounding_text());

        let labels: Vec<_> = first.nodes().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Event", "Person", "Talk"]);

        let edges: Vec<_> = first
            .edges()
            .iter()
            .map(|e| format!("{}-{}-{}", e.source, e.label, e.destination))
            .collect();
        assert_eq!(
            edges,
            vec![
                "Person-ATTENDED-Event",
                "Person-ATTENDED-Talk",
                "Person-GAVE_TALK-Talk",
                "Talk-PART_OF-Event",
            ]
        );
    }

    #[tokio::test]
    async fn test_grounding_text_keeps_declared_direction() {
        let backend = SchemaOnlyBackend::conference();
        let text = introspect_schema(&backend).await.unwrap().to_grounding_text();
        assert!(text.contains("(:Person) -[:GAVE_TALK]-> (:Talk)"));
        assert!(text.contains("(:Talk) -[:PART_OF]-> (:Event)"));
        assert!(text.contains("- GAVE_TALK\n    - role: string"));
        assert!(!text.contains("- PART_OF\n"));
    }

    #[tokio::test]
    async fn test_shared_relationship_table_is_fetched_once() {
        let backend = SchemaOnlyBackend::conference();
        introspect_schema(&backend).await.unwrap();
        // 3 node tables + 3 distinct relationship names.
        assert_eq!(backend.table_info_calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_relationship_named_like_a_label_keeps_its_own_properties() {
        let mut backend = SchemaOnlyBackend::conference();
        backend.node_tables.push("Session");
        backend.rel_tables.push(("Session", "Person", "Talk"));
        backend
            .columns
            .push((Node, "Session", vec![("room", "STRING")]));
        backend
            .columns
            .push((Relationship, "Session", vec![("slot", "INT64")]));

        let text = introspect_schema(&backend).await.unwrap().to_grounding_text();
        let (nodes, edges) = text.split_once("Edge properties:").unwrap();
        assert!(nodes.contains("  - Session\n    - room: string"));
        assert!(!nodes.contains("slot"));
        assert!(edges.contains("- Session\n    - slot: int64"));
        assert!(!edges.contains("room"));
    }

    #[tokio::test]
    async fn test_introspection_error_propagates() {
        let mut backend = SchemaOnlyBackend::conference();
        backend.node_tables.push("Ghost");
        let err = introspect_schema(&backend).await.unwrap_err();
        assert!(matches!(err, GraphError::UnknownTable(ref t) if t == "Ghost"));
    }
}

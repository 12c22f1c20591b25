//! The typed interface every graph backend implements.

use async_trait::async_trait;
use graphqa_core::Row;

use crate::client::GraphError;

/// A relationship table with its declared endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelTable {
    pub name: String,
    pub source: String,
    pub destination: String,
}

/// Which namespace a table name belongs to.
///
/// Node labels and relationship types are separate in a property graph,
/// so the same name can denote one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Node,
    Relationship,
}

/// One column of a node or relationship table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub ordinal: usize,
    pub name: String,
    pub declared_type: String,
}

/// Rows exactly as the backend returned them, duplicates included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Read-only access to a property graph.
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Names of all node tables.
    async fn node_tables(&self) -> Result<Vec<String>, GraphError>;

    /// All relationship tables with their source and destination labels.
    async fn rel_tables(&self) -> Result<Vec<RelTable>, GraphError>;

    /// Column definitions of a node or relationship table.
    async fn table_info(&self, table: &str, kind: TableKind)
        -> Result<Vec<ColumnInfo>, GraphError>;

    /// Run an arbitrary query once and collect every row. Nothing is committed.
    async fn execute(&self, query: &str) -> Result<RawResult, GraphError>;
}

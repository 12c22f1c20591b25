//! graphqa-graph: read-only access to the property graph.
//!
//! All graph reads flow through the [`GraphBackend`] trait: table
//! enumeration, per-table column introspection, and query execution.
//! [`GraphClient`] implements it for Neo4j over Bolt and rolls back every
//! transaction it opens, so generated queries cannot change the graph.

pub mod backend;
pub mod client;
pub mod columns;
pub mod executor;
pub mod schema;

pub use backend::{ColumnInfo, GraphBackend, RawResult, RelTable, TableKind};
pub use client::{GraphClient, GraphConfig, GraphError};
pub use executor::execute_query;
pub use schema::introspect_schema;

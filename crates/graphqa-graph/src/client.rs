//! Neo4j connection management and the read-only graph client.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query, Txn};
use serde::Deserialize;

use crate::backend::{ColumnInfo, GraphBackend, RawResult, RelTable, TableKind};
use crate::columns::{order_columns, projection_columns};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Query timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration for connecting to Neo4j.
///
/// Loaded from the `[neo4j]` section of `graphqa.toml` or
/// `GRAPHQA__NEO4J__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
    /// Upper bound on a single query, including row collection.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "graphqa-dev".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_fetch_size() -> usize {
    256
}

fn default_query_timeout() -> u64 {
    30
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

const NODE_TABLES: &str = "CALL db.labels() YIELD label RETURN label";

const REL_TABLES: &str = "MATCH (a)-[r]->(b)
     UNWIND labels(a) AS source
     UNWIND labels(b) AS destination
     RETURN DISTINCT source, type(r) AS name, destination";

const NODE_PROPERTIES: &str = "CALL db.schema.nodeTypeProperties()
     YIELD nodeLabels, propertyName, propertyTypes
     WITH nodeLabels, propertyName, propertyTypes
     WHERE $label IN nodeLabels
     RETURN propertyName, propertyTypes";

const REL_PROPERTIES: &str = "CALL db.schema.relTypeProperties()
     YIELD relType, propertyName, propertyTypes
     WITH relType, propertyName, propertyTypes
     WHERE relType = $rel_type
     RETURN propertyName, propertyTypes";

/// Neo4j graph client.
///
/// Clone is cheap (inner Arc). No transaction it opens is ever committed.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    query_timeout: Duration,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self {
            graph,
            query_timeout: Duration::from_secs(config.query_timeout_secs),
        })
    }

    /// Run one query and collect all rows, bounded by the query timeout.
    ///
    /// The query runs exactly once inside an explicit transaction that is
    /// always rolled back, so nothing it writes is ever committed.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let collect = async {
            let mut txn = self.graph.start_txn().await?;
            let rows = read_all(&mut txn, query).await;
            if let Err(e) = txn.rollback().await {
                tracing::warn!(error = %e, "Failed to roll back read transaction");
            }
            Ok::<_, GraphError>(rows?)
        };

        tokio::time::timeout(self.query_timeout, collect)
            .await
            .map_err(|_| GraphError::Timeout {
                seconds: self.query_timeout.as_secs(),
            })?
    }
}

async fn read_all(txn: &mut Txn, query: Query) -> Result<Vec<neo4rs::Row>, neo4rs::Error> {
    let mut stream = txn.execute(query).await?;
    let mut rows = Vec::new();
    while let Some(row) = stream.next(txn.handle()).await? {
        rows.push(row);
    }
    Ok(rows)
}

/// Align field maps to positional rows.
///
/// Without rows there are no keys to read, so the projection names the columns.
fn raw_result(cypher: &str, records: Vec<HashMap<String, serde_json::Value>>) -> RawResult {
    let projection = projection_columns(cypher);
    let columns = match records.first() {
        Some(first) => order_columns(&projection, first.keys().cloned().collect()),
        None => projection,
    };

    let rows = records
        .into_iter()
        .map(|mut record| {
            columns
                .iter()
                .map(|c| record.remove(c).unwrap_or(serde_json::Value::Null))
                .collect()
        })
        .collect();

    RawResult { columns, rows }
}

#[async_trait]
impl GraphBackend for GraphClient {
    async fn node_tables(&self) -> Result<Vec<String>, GraphError> {
        let rows = self.query_rows(query(NODE_TABLES)).await?;
        rows.iter()
            .map(|row| {
                row.get::<String>("label").map_err(|e| {
                    GraphError::Serialization(format!("Failed to read node label: {e}"))
                })
            })
            .collect()
    }

    async fn rel_tables(&self) -> Result<Vec<RelTable>, GraphError> {
        let rows = self.query_rows(query(REL_TABLES)).await?;
        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let field = |key: &str| {
                row.get::<String>(key).map_err(|e| {
                    GraphError::Serialization(format!("Failed to read relationship {key}: {e}"))
                })
            };
            tables.push(RelTable {
                name: field("name")?,
                source: field("source")?,
                destination: field("destination")?,
            });
        }
        Ok(tables)
    }

    async fn table_info(&self, table: &str, kind: TableKind) -> Result<Vec<ColumnInfo>, GraphError> {
        let lookup = match kind {
            TableKind::Node => query(NODE_PROPERTIES).param("label", table.to_string()),
            TableKind::Relationship => {
                query(REL_PROPERTIES).param("rel_type", format!(":`{table}`"))
            }
        };
        let rows = self.query_rows(lookup).await?;
        if rows.is_empty() {
            return Err(GraphError::UnknownTable(table.to_string()));
        }

        // Labels without properties still yield one row with a null name.
        // A label shared by several label combinations repeats its properties.
        let mut properties = BTreeSet::new();
        for row in rows {
            let Ok(Some(name)) = row.get::<Option<String>>("propertyName") else {
                continue;
            };
            let types: Vec<String> = row.get("propertyTypes").unwrap_or_default();
            properties.insert((name, types.join("|")));
        }

        Ok(properties
            .into_iter()
            .enumerate()
            .map(|(ordinal, (name, declared_type))| ColumnInfo {
                ordinal,
                name,
                declared_type,
            })
            .collect())
    }

    async fn execute(&self, cypher: &str) -> Result<RawResult, GraphError> {
        let rows = self.query_rows(query(cypher)).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let record: HashMap<String, serde_json::Value> = row.to().map_err(|e| {
                GraphError::Serialization(format!("Failed to deserialize result row: {e}"))
            })?;
            records.push(record);
        }

        Ok(raw_result(cypher, records))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(pairs: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_rows_follow_projection_order() {
        let result = raw_result(
            "MATCH (t:Talk) RETURN t.title AS title, t.year AS year",
            vec![
                record(&[("year", json!(2021)), ("title", json!("Keynote"))]),
                record(&[("title", json!("Panel")), ("year", json!(2022))]),
            ],
        );
        assert_eq!(result.columns, vec!["title", "year"]);
        assert_eq!(
            result.rows,
            vec![
                vec![json!("Keynote"), json!(2021)],
                vec![json!("Panel"), json!(2022)],
            ]
        );
    }

    #[test]
    fn test_empty_result_still_names_its_columns() {
        let result = raw_result(
            "MATCH (n:NoSuchLabel) RETURN n.name AS name, n.age AS age",
            Vec::new(),
        );
        assert_eq!(result.columns, vec!["name", "age"]);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.uri, "bolt://localhost:7687");
        assert_eq!(config.user, "neo4j");
        assert_eq!(config.query_timeout_secs, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: GraphConfig =
            serde_json::from_str(r#"{"uri": "bolt://graph:7687", "query_timeout_secs": 5}"#)
                .unwrap();
        assert_eq!(config.uri, "bolt://graph:7687");
        assert_eq!(config.password, "graphqa-dev");
        assert_eq!(config.query_timeout_secs, 5);
    }
}

//! Graph schema descriptors and the grounding-text renderer.
//!
//! A [`GraphSchema`] is built once from backend introspection and rendered
//! into the text handed to the query generation service. Every list is kept
//! in a fixed order so that an unchanged schema always renders to the same
//! bytes.

use serde::{Deserialize, Serialize};

/// A declared property on a node or edge table.
///
/// Field order matters: the derived `Ord` sorts by (name, declared type).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub declared_type: String,
}

impl Property {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A node table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeType {
    pub label: String,
    pub properties: Vec<Property>,
}

impl NodeType {
    pub fn new(label: impl Into<String>, mut properties: Vec<Property>) -> Self {
        properties.sort();
        Self {
            label: label.into(),
            properties,
        }
    }
}

/// A relationship table. Always directed from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeType {
    pub label: String,
    pub source: String,
    pub destination: String,
    pub properties: Vec<Property>,
}

impl EdgeType {
    pub fn new(
        label: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        mut properties: Vec<Property>,
    ) -> Self {
        properties.sort();
        Self {
            label: label.into(),
            source: source.into(),
            destination: destination.into(),
            properties,
        }
    }

    fn sort_key(&self) -> (&str, &str, &str) {
        (&self.source, &self.label, &self.destination)
    }
}

/// The full set of node and edge tables of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSchema {
    nodes: Vec<NodeType>,
    edges: Vec<EdgeType>,
}

impl GraphSchema {
    /// Build a schema, sorting nodes by label and edges by
    /// (source, label, destination).
    pub fn new(mut nodes: Vec<NodeType>, mut edges: Vec<EdgeType>) -> Self {
        nodes.sort_by(|a, b| a.label.cmp(&b.label));
        edges.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[NodeType] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeType] {
        &self.edges
    }

    /// Render the schema as grounding text for query generation.
    ///
    /// Layout:
    /// ```text
    /// ALWAYS RESPECT THE EDGE DIRECTIONS:
    /// ---
    /// (:Person) -[:GAVE_TALK]-> (:Talk)
    /// ---
    ///
    /// Node properties:
    ///   - Person
    ///     - name: string
    ///
    /// Edge properties:
    /// - GAVE_TALK
    ///     - year: int64
    /// ```
    /// Edges without properties are left out of the last block.
    pub fn to_grounding_text(&self) -> String {
        let mut lines = Vec::new();

        lines.push("ALWAYS RESPECT THE EDGE DIRECTIONS:\n---".to_string());
        for edge in &self.edges {
            lines.push(format!(
                "(:{}) -[:{}]-> (:{})",
                edge.source, edge.label, edge.destination
            ));
        }
        lines.push("---".to_string());

        lines.push("\nNode properties:".to_string());
        for node in &self.nodes {
            lines.push(format!("  - {}", node.label));
            lines.extend(render_properties(&node.properties));
        }

        lines.push("\nEdge properties:".to_string());
        for edge in self.edges.iter().filter(|e| !e.properties.is_empty()) {
            lines.push(format!("- {}", edge.label));
            lines.extend(render_properties(&edge.properties));
        }

        lines.join("\n")
    }
}

fn render_properties(properties: &[Property]) -> impl Iterator<Item = String> + '_ {
    properties
        .iter()
        .map(|p| format!("    - {}: {}", p.name, p.declared_type.to_lowercase()))
}

//! # Graph Document
//!
//! The persisted, JSON-safe graph: the contract between the exporter and
//! everything downstream. Once written it is consumed independently of the
//! exporter, so the wire shape here must stay stable:
//!
//! ```text
//! {
//!   "nodes":         [{ "id", "caption", "labels", "properties" }],
//!   "relationships": [{ "id", "from", "to", "type", "caption", "properties" }],
//!   "stats":         { "totalNodes", "totalRelationships", "nodeTypes", "relationshipTypes" }
//! }
//! ```
//!
//! Documents are immutable input to the projection. Nothing in this crate
//! mutates a loaded document; derived structures are always new values.

use std::collections::BTreeSet;
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// JSON-safe property map. Values are already normalized.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Node labels. Almost every node carries one or two.
pub type Labels = SmallVec<[String; 2]>;

// ============================================================================
// Node / Relationship
// ============================================================================

/// A node in the exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Sequential export id (`"1"`, `"2"`, …).
    pub id: String,
    #[serde(default)]
    pub caption: String,
    /// Display order only; not semantically significant.
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub properties: Properties,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: String::new(),
            labels: Labels::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// First label, used as the short type tag in detail views.
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// A relationship in the exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRelationship {
    /// Sequential export id (`"r1"`, `"r2"`, …).
    pub id: String,
    #[serde(rename = "from", alias = "fromId")]
    pub from_id: String,
    #[serde(rename = "to", alias = "toId")]
    pub to_id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub properties: Properties,
}

impl GraphRelationship {
    /// Create a relationship whose caption is its type.
    pub fn new(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        rel_type: impl Into<String>,
    ) -> Self {
        let rel_type = rel_type.into();
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            caption: rel_type.clone(),
            rel_type,
            properties: Properties::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.from_id == node_id || self.to_id == node_id
    }

    /// The "other" end of the relationship from the given node.
    pub fn other_end(&self, node_id: &str) -> Option<&str> {
        if node_id == self.from_id { Some(&self.to_id) }
        else if node_id == self.to_id { Some(&self.from_id) }
        else { None }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_id == self.to_id
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Summary statistics. Derived; always recomputable from the graph itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_relationships: usize,
    /// Sorted, unique node labels.
    pub node_types: Vec<String>,
    /// Sorted, unique relationship types.
    pub relationship_types: Vec<String>,
}

impl GraphStats {
    pub fn compute(nodes: &[GraphNode], relationships: &[GraphRelationship]) -> Self {
        let node_types: BTreeSet<&str> = nodes
            .iter()
            .flat_map(|n| n.labels.iter().map(String::as_str))
            .collect();
        let relationship_types: BTreeSet<&str> = relationships
            .iter()
            .map(|r| r.rel_type.as_str())
            .collect();

        Self {
            total_nodes: nodes.len(),
            total_relationships: relationships.len(),
            node_types: node_types.into_iter().map(str::to_owned).collect(),
            relationship_types: relationship_types.into_iter().map(str::to_owned).collect(),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A self-contained exported graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub relationships: Vec<GraphRelationship>,
    #[serde(default)]
    pub stats: GraphStats,
}

impl GraphDocument {
    /// Build a document, computing its stats.
    pub fn new(nodes: Vec<GraphNode>, relationships: Vec<GraphRelationship>) -> Self {
        let stats = GraphStats::compute(&nodes, &relationships);
        Self { nodes, relationships, stats }
    }

    /// A document with no nodes renders as "no data", not as an error.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn relationship(&self, id: &str) -> Option<&GraphRelationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Sorted, unique labels across all nodes.
    pub fn labels(&self) -> &[String] {
        &self.stats.node_types
    }

    /// True when the stored stats match the graph.
    pub fn stats_are_current(&self) -> bool {
        self.stats == GraphStats::compute(&self.nodes, &self.relationships)
    }

    /// Check id uniqueness and referential integrity.
    pub fn validate(&self) -> Result<()> {
        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return Err(Error::InvalidDocument(format!("duplicate node id '{}'", node.id)));
            }
        }

        let mut rel_ids = HashSet::with_capacity(self.relationships.len());
        for rel in &self.relationships {
            if !rel_ids.insert(rel.id.as_str()) {
                return Err(Error::InvalidDocument(format!("duplicate relationship id '{}'", rel.id)));
            }
            for endpoint in [&rel.from_id, &rel.to_id] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(Error::InvalidDocument(format!(
                        "relationship '{}' references missing node '{endpoint}'",
                        rel.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a document. Stale stats are recomputed.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: GraphDocument = serde_json::from_str(json)?;
        doc.validate()?;
        if !doc.stats_are_current() {
            tracing::warn!(
                stored_nodes = doc.stats.total_nodes,
                actual_nodes = doc.nodes.len(),
                "graph document stats are stale, recomputing"
            );
            doc.stats = GraphStats::compute(&doc.nodes, &doc.relationships);
        }
        Ok(doc)
    }

    /// Read, parse and validate a document file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> GraphDocument {
        GraphDocument::new(
            vec![
                GraphNode::new("1").with_labels(["Person"]).with_caption("Ada"),
                GraphNode::new("2").with_labels(["Organization", "Lab"]).with_caption("Acme"),
            ],
            vec![GraphRelationship::new("r1", "1", "2", "WORKS_AT")],
        )
    }

    #[test]
    fn test_stats_sorted_unique() {
        let doc = sample();
        assert_eq!(doc.stats.total_nodes, 2);
        assert_eq!(doc.stats.total_relationships, 1);
        assert_eq!(doc.stats.node_types, vec!["Lab", "Organization", "Person"]);
        assert_eq!(doc.stats.relationship_types, vec!["WORKS_AT"]);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["relationships"][0]["from"], json!("1"));
        assert_eq!(value["relationships"][0]["to"], json!("2"));
        assert_eq!(value["relationships"][0]["type"], json!("WORKS_AT"));
        assert_eq!(value["relationships"][0]["caption"], json!("WORKS_AT"));
        assert_eq!(value["stats"]["totalNodes"], json!(2));
        assert_eq!(value["stats"]["nodeTypes"], json!(["Lab", "Organization", "Person"]));
    }

    #[test]
    fn test_from_json_accepts_id_aliases() {
        let doc = GraphDocument::from_json(
            r#"{
                "nodes": [{"id": "1", "labels": ["A"]}, {"id": "2"}],
                "relationships": [{"id": "r1", "fromId": "1", "toId": "2", "type": "T"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.relationships[0].from_id, "1");
        assert_eq!(doc.relationships[0].to_id, "2");
        // stats were absent and get recomputed
        assert_eq!(doc.stats.total_relationships, 1);
        assert_eq!(doc.stats.node_types, vec!["A"]);
    }

    #[test]
    fn test_from_json_rejects_dangling_endpoint() {
        let err = GraphDocument::from_json(
            r#"{"nodes": [{"id": "1"}], "relationships": [{"id": "r1", "from": "1", "to": "9", "type": "T"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidDocument(_)));
    }

    #[test]
    fn test_validate_rejects_duplicate_node() {
        let doc = GraphDocument::new(vec![GraphNode::new("1"), GraphNode::new("1")], vec![]);
        assert!(matches!(doc.validate(), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_empty_document() {
        let doc = GraphDocument::from_json("{}").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.stats, GraphStats::default());
    }

    #[test]
    fn test_other_end() {
        let rel = GraphRelationship::new("r1", "1", "2", "T");
        assert_eq!(rel.other_end("1"), Some("2"));
        assert_eq!(rel.other_end("2"), Some("1"));
        assert_eq!(rel.other_end("3"), None);
    }
}

//! Everything attached to one node, for detail panels.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Serialize;

use crate::document::{GraphDocument, GraphNode, GraphRelationship};

/// Direction of a relationship as seen from the focus node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The focus node is `from`. Self-loops count as outgoing.
    Outgoing,
    Incoming,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedNode<'g> {
    pub node: &'g GraphNode,
    pub relationship: &'g GraphRelationship,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood<'g> {
    pub node: &'g GraphNode,
    /// Every relationship touching the node, in document order.
    pub relationships: Vec<&'g GraphRelationship>,
    pub related: Vec<RelatedNode<'g>>,
    /// Relationship type → count over `relationships`.
    pub type_counts: BTreeMap<String, usize>,
}

/// Collect the neighborhood of `node_id`. `None` if the node does not exist.
pub fn neighborhood<'g>(document: &'g GraphDocument, node_id: &str) -> Option<Neighborhood<'g>> {
    let node = document.node(node_id)?;
    let by_id: HashMap<&str, &GraphNode> = document.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let relationships: Vec<&GraphRelationship> = document
        .relationships
        .iter()
        .filter(|r| r.touches(node_id))
        .collect();

    let mut type_counts = BTreeMap::new();
    for rel in &relationships {
        *type_counts.entry(rel.rel_type.clone()).or_insert(0) += 1;
    }

    let related = relationships
        .iter()
        .filter_map(|&rel| {
            let (other, direction) = if rel.from_id == node_id {
                (rel.to_id.as_str(), Direction::Outgoing)
            } else {
                (rel.from_id.as_str(), Direction::Incoming)
            };
            by_id.get(other).map(|&node| RelatedNode { node, relationship: rel, direction })
        })
        .collect();

    Some(Neighborhood { node, relationships, related, type_counts })
}

impl Neighborhood<'_> {
    pub fn degree(&self) -> usize {
        self.relationships
            .iter()
            .map(|r| if r.is_self_loop() { 2 } else { 1 })
            .sum()
    }
}

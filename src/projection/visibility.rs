//! Which nodes and relationships to render under a filter.
//!
//! A node is *directly visible* when it has no labels or at least one shown
//! label. A relationship is rendered when at least one endpoint is directly
//! visible. Its other endpoint may be filtered out; such a node is still
//! rendered as a *ghost* (`hidden: true`) so every rendered edge has both
//! endpoints on screen.
//!
//! Ghosts are anchored: with every label hidden nothing is directly visible,
//! so there are no ghosts and no edges either.

use hashbrown::HashSet;

use crate::document::{GraphNode, GraphRelationship};
use super::FilterState;

/// Result of resolving a filter against a graph.
///
/// All three lists keep document order, so resolving the same input twice
/// yields identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility<'g> {
    pub visible_nodes: Vec<&'g GraphNode>,
    pub ghost_nodes: Vec<&'g GraphNode>,
    pub visible_relationships: Vec<&'g GraphRelationship>,
}

/// A node scheduled for rendering, with its ghost flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCandidate<'g> {
    pub node: &'g GraphNode,
    pub ghost: bool,
}

pub fn is_directly_visible(node: &GraphNode, filters: &FilterState) -> bool {
    node.labels.is_empty() || node.labels.iter().any(|l| filters.is_visible(l))
}

/// Resolve `filters` against the full graph.
pub fn resolve<'g>(
    nodes: &'g [GraphNode],
    relationships: &'g [GraphRelationship],
    filters: &FilterState,
) -> Visibility<'g> {
    let visible_nodes: Vec<&GraphNode> = nodes
        .iter()
        .filter(|n| is_directly_visible(n, filters))
        .collect();
    let visible_ids: HashSet<&str> = visible_nodes.iter().map(|n| n.id.as_str()).collect();

    let mut visible_relationships = Vec::new();
    let mut ghost_ids: HashSet<&str> = HashSet::new();

    // Every relationship of the full graph is an anchor candidate.
    for rel in relationships {
        let from_visible = visible_ids.contains(rel.from_id.as_str());
        let to_visible = visible_ids.contains(rel.to_id.as_str());

        if from_visible || to_visible {
            visible_relationships.push(rel);
        }
        if from_visible && !to_visible {
            ghost_ids.insert(rel.to_id.as_str());
        } else if to_visible && !from_visible {
            ghost_ids.insert(rel.from_id.as_str());
        }
    }

    let ghost_nodes = if ghost_ids.is_empty() {
        Vec::new()
    } else {
        nodes.iter().filter(|n| ghost_ids.contains(n.id.as_str())).collect()
    };

    Visibility { visible_nodes, ghost_nodes, visible_relationships }
}

impl<'g> Visibility<'g> {
    /// Visible nodes first, then ghosts.
    pub fn render_candidates(&self) -> impl Iterator<Item = RenderCandidate<'g>> + '_ {
        self.visible_nodes
            .iter()
            .map(|&node| RenderCandidate { node, ghost: false })
            .chain(self.ghost_nodes.iter().map(|&node| RenderCandidate { node, ghost: true }))
    }

    pub fn render_node_count(&self) -> usize {
        self.visible_nodes.len() + self.ghost_nodes.len()
    }

    pub fn is_ghost(&self, node_id: &str) -> bool {
        self.ghost_nodes.iter().any(|n| n.id == node_id)
    }

    pub fn visible_ids(&self) -> Vec<&'g str> {
        self.visible_nodes.iter().map(|&n| n.id.as_str()).collect()
    }

    pub fn ghost_ids(&self) -> Vec<&'g str> {
        self.ghost_nodes.iter().map(|&n| n.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_works_at_org() -> (Vec<GraphNode>, Vec<GraphRelationship>) {
        (
            vec![
                GraphNode::new("1").with_labels(["Person"]),
                GraphNode::new("2").with_labels(["Organization"]),
            ],
            vec![GraphRelationship::new("r1", "1", "2", "WORKS_AT")],
        )
    }

    #[test]
    fn test_filtered_endpoint_becomes_ghost() {
        let (nodes, rels) = person_works_at_org();
        let filters = FilterState::new().with("Person", false).with("Organization", true);
        let v = resolve(&nodes, &rels, &filters);

        assert_eq!(v.visible_ids(), vec!["2"]);
        assert_eq!(v.ghost_ids(), vec!["1"]);
        assert_eq!(v.visible_relationships.len(), 1);
        assert_eq!(v.visible_relationships[0].id, "r1");
        assert!(v.is_ghost("1"));
    }

    #[test]
    fn test_everything_hidden_means_no_ghosts() {
        let (nodes, rels) = person_works_at_org();
        let filters = FilterState::new().with("Person", false).with("Organization", false);
        let v = resolve(&nodes, &rels, &filters);

        assert!(v.visible_nodes.is_empty());
        assert!(v.ghost_nodes.is_empty());
        assert!(v.visible_relationships.is_empty());
    }

    #[test]
    fn test_unlabeled_node_always_visible() {
        let nodes = vec![GraphNode::new("1"), GraphNode::new("2").with_labels(["X"])];
        let rels = vec![GraphRelationship::new("r1", "1", "2", "T")];
        let v = resolve(&nodes, &rels, &FilterState::new().with("X", false));
        assert_eq!(v.visible_ids(), vec!["1"]);
        assert_eq!(v.ghost_ids(), vec!["2"]);
    }

    #[test]
    fn test_multi_label_needs_one_shown_label() {
        let nodes = vec![GraphNode::new("1").with_labels(["A", "B"])];
        let v = resolve(&nodes, &[], &FilterState::new().with("A", false));
        assert_eq!(v.visible_ids(), vec!["1"]);
        let v = resolve(&nodes, &[], &FilterState::new().with("A", false).with("B", false));
        assert!(v.visible_ids().is_empty());
    }

    #[test]
    fn test_ghost_to_ghost_edge_not_rendered() {
        // 2 and 3 are both ghosts of visible 1; the 2-3 edge has no visible endpoint.
        let nodes = vec![
            GraphNode::new("1").with_labels(["V"]),
            GraphNode::new("2").with_labels(["H"]),
            GraphNode::new("3").with_labels(["H"]),
        ];
        let rels = vec![
            GraphRelationship::new("r1", "1", "2", "T"),
            GraphRelationship::new("r2", "1", "3", "T"),
            GraphRelationship::new("r3", "2", "3", "T"),
        ];
        let v = resolve(&nodes, &rels, &FilterState::new().with("H", false));
        assert_eq!(v.ghost_ids(), vec!["2", "3"]);
        let rel_ids: Vec<_> = v.visible_relationships.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(rel_ids, vec!["r1", "r2"]);
    }

    #[test]
    fn test_render_candidates_order() {
        let (nodes, rels) = person_works_at_org();
        let v = resolve(&nodes, &rels, &FilterState::new().with("Person", false));
        let candidates: Vec<_> = v.render_candidates().map(|c| (c.node.id.as_str(), c.ghost)).collect();
        assert_eq!(candidates, vec![("2", false), ("1", true)]);
        assert_eq!(v.render_node_count(), 2);
    }
}

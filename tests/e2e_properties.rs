//! Properties of export and projection over random graphs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use graph_projection::projection::{self, is_directly_visible};
use graph_projection::{
    build_document, compute_degrees, resolve, FilterState, GraphDocument, Node, NodeId, RelId,
    Relationship, StyleConfig,
};

const LABELS: [&str; 3] = ["Person", "Organization", "Domain"];
const MAX_NODES: usize = 12;
const MAX_RELS: usize = 24;

/// Raw nodes with ids `0..n` and raw relationships whose endpoints may
/// point past the last node.
fn raw_graph_strategy() -> impl Strategy<Value = (Vec<Node>, Vec<Relationship>)> {
    (0usize..=MAX_NODES).prop_flat_map(|n| {
        let labels = prop::collection::vec(prop::collection::vec(0usize..LABELS.len(), 0..=2), n);
        let rels = prop::collection::vec((0u64..(n as u64 + 3), 0u64..(n as u64 + 3), 0usize..3), 0..=MAX_RELS);
        (labels, rels)
    })
    .prop_map(|(labels, rels)| {
        let nodes = labels
            .into_iter()
            .enumerate()
            .map(|(i, picks)| {
                let names: BTreeSet<&str> = picks.into_iter().map(|p| LABELS[p]).collect();
                Node::new(NodeId(i as u64)).with_labels(names)
            })
            .collect();
        let relationships = rels
            .into_iter()
            .enumerate()
            .map(|(i, (src, dst, t))| {
                Relationship::new(RelId(i as u64), NodeId(src), NodeId(dst), ["KNOWS", "WORKS_AT", "OWNS"][t])
            })
            .collect();
        (nodes, relationships)
    })
}

fn document_strategy() -> impl Strategy<Value = GraphDocument> {
    raw_graph_strategy().prop_map(|(nodes, rels)| build_document(nodes, rels))
}

fn filter_strategy() -> impl Strategy<Value = FilterState> {
    prop::collection::vec(any::<bool>(), LABELS.len())
        .prop_map(|shown| LABELS.iter().copied().zip(shown).collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn export_keeps_referential_integrity((nodes, rels) in raw_graph_strategy()) {
        let node_count = nodes.len() as u64;
        let resolvable = rels
            .iter()
            .filter(|r| r.src.0 < node_count && r.dst.0 < node_count)
            .count();

        let doc = build_document(nodes, rels);
        prop_assert!(doc.validate().is_ok());
        prop_assert_eq!(doc.stats.total_relationships, resolvable);
        prop_assert_eq!(doc.stats.total_nodes, node_count as usize);
    }

    #[test]
    fn export_ids_are_stable((nodes, rels) in raw_graph_strategy()) {
        let first = build_document(nodes.clone(), rels.clone());

        let mut shuffled_nodes = nodes;
        shuffled_nodes.reverse();
        let mut shuffled_rels = rels;
        shuffled_rels.reverse();
        let second = build_document(shuffled_nodes, shuffled_rels);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn degree_total_is_twice_relationship_count(doc in document_strategy()) {
        let degrees = compute_degrees(&doc.nodes, &doc.relationships);
        prop_assert_eq!(degrees.len(), doc.nodes.len());
        prop_assert_eq!(degrees.total(), 2 * doc.relationships.len());
    }

    #[test]
    fn showing_a_label_never_shrinks_visible_set(
        doc in document_strategy(),
        filters in filter_strategy(),
        label in 0usize..LABELS.len(),
    ) {
        let before = resolve(&doc.nodes, &doc.relationships, &filters);
        let widened = filters.clone().with(LABELS[label], true);
        let after = resolve(&doc.nodes, &doc.relationships, &widened);

        let after_ids: BTreeSet<&str> = after.visible_ids().into_iter().collect();
        for id in before.visible_ids() {
            prop_assert!(after_ids.contains(id), "{} vanished after showing {}", id, LABELS[label]);
        }
    }

    #[test]
    fn ghosts_are_minimal(doc in document_strategy(), filters in filter_strategy()) {
        let vis = resolve(&doc.nodes, &doc.relationships, &filters);
        let visible: BTreeSet<&str> = vis.visible_ids().into_iter().collect();
        let ghosts: BTreeSet<&str> = vis.ghost_ids().into_iter().collect();

        for ghost in &vis.ghost_nodes {
            prop_assert!(!is_directly_visible(ghost, &filters));
            let anchored = doc.relationships.iter().any(|r| {
                r.other_end(&ghost.id).is_some_and(|other| visible.contains(other))
            });
            prop_assert!(anchored, "ghost {} has no visible neighbor", ghost.id);
        }

        // Every filtered-out neighbor of a visible node is a ghost.
        for node in doc.nodes.iter().filter(|n| !is_directly_visible(n, &filters)) {
            let anchored = doc.relationships.iter().any(|r| {
                r.other_end(&node.id).is_some_and(|other| visible.contains(other))
            });
            if anchored {
                prop_assert!(ghosts.contains(node.id.as_str()), "{} should be a ghost", node.id);
            }
        }

        // Every rendered edge has both endpoints rendered.
        for rel in &vis.visible_relationships {
            for end in [rel.from_id.as_str(), rel.to_id.as_str()] {
                prop_assert!(visible.contains(end) || ghosts.contains(end));
            }
        }
    }

    #[test]
    fn projection_is_idempotent(
        doc in document_strategy(),
        filters in filter_strategy(),
        use_degree in any::<bool>(),
        multiplier in 0.1f64..4.0,
    ) {
        let degrees = compute_degrees(&doc.nodes, &doc.relationships);
        let style = StyleConfig { size_multiplier: multiplier, use_degree_for_size: use_degree, ..StyleConfig::default() };

        let first = projection::project(&doc, &degrees, &filters, &style);
        let second = projection::project(&doc, &degrees, &filters, &style);
        prop_assert_eq!(first, second);
    }
}

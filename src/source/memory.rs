//! In-memory graph source.
//!
//! This is the reference implementation of `GraphSource`.
//! It uses ordered maps protected by RwLock.
//!
//! ## Limitations
//!
//! - **No endpoint validation**: `insert_relationship()` accepts endpoints
//!   that do not exist, the same way a live database can return a
//!   relationship whose node was filtered out of the node scan. The exporter
//!   is responsible for dropping those.
//!
//! Use this source for:
//! - Testing the exporter without a database
//! - Embedding graph-projection in applications that build graphs in memory

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use async_trait::async_trait;

use crate::model::*;
use crate::Result;
use super::GraphSource;

// ============================================================================
// MemorySource
// ============================================================================

/// In-memory raw property graph.
#[derive(Clone, Default)]
pub struct MemorySource {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    nodes: RwLock<BTreeMap<NodeId, Node>>,
    relationships: RwLock<BTreeMap<RelId, Relationship>>,
    next_node_id: AtomicU64,
    next_rel_id: AtomicU64,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a fresh internal id.
    pub fn create_node(&self, labels: &[&str], props: PropertyMap) -> NodeId {
        let id = NodeId(self.inner.next_node_id.fetch_add(1, Ordering::Relaxed));
        let node = Node {
            id,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            properties: props,
        };
        self.inner.nodes.write().insert(id, node);
        id
    }

    /// Create a relationship with a fresh internal id.
    pub fn create_relationship(
        &self,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        props: PropertyMap,
    ) -> RelId {
        let id = RelId(self.inner.next_rel_id.fetch_add(1, Ordering::Relaxed));
        let mut rel = Relationship::new(id, src, dst, rel_type);
        rel.properties = props;
        self.inner.relationships.write().insert(id, rel);
        id
    }

    /// Insert a node under its own internal id, replacing any previous one.
    pub fn insert_node(&self, node: Node) {
        self.inner.next_node_id.fetch_max(node.id.0 + 1, Ordering::Relaxed);
        self.inner.nodes.write().insert(node.id, node);
    }

    /// Insert a relationship under its own internal id, replacing any previous one.
    pub fn insert_relationship(&self, rel: Relationship) {
        self.inner.next_rel_id.fetch_max(rel.id.0 + 1, Ordering::Relaxed);
        self.inner.relationships.write().insert(rel.id, rel);
    }

    /// Remove a node. Relationships pointing at it are left dangling.
    pub fn remove_node(&self, id: NodeId) -> Option<Node> {
        self.inner.nodes.write().remove(&id)
    }

    pub fn node_count(&self) -> usize {
        self.inner.nodes.read().len()
    }

    pub fn relationship_count(&self) -> usize {
        self.inner.relationships.read().len()
    }
}

// ============================================================================
// GraphSource impl
// ============================================================================

#[async_trait]
impl GraphSource for MemorySource {
    async fn all_nodes(&self) -> Result<Vec<Node>> {
        Ok(self.inner.nodes.read().values().cloned().collect())
    }

    async fn all_relationships(&self) -> Result<Vec<Relationship>> {
        Ok(self.inner.relationships.read().values().cloned().collect())
    }
}

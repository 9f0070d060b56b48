//! # Graph Source Trait
//!
//! This is THE contract between the exporter and whatever holds the graph.
//! The exporter needs exactly two reads: every node and every relationship.
//! Transport (Bolt session, HTTP, embedded store) is the implementor's business.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemorySource` | `memory` | In-memory graph for testing/embedding |
//!
//! A driver-backed source issues the equivalent of:
//!
//! ```text
//! MATCH (n) RETURN id(n), labels(n), properties(n) ORDER BY id(n)
//! MATCH (a)-[r]->(b) RETURN id(a), id(b), type(r), properties(r), id(r) ORDER BY id(r)
//! ```

pub mod memory;

use async_trait::async_trait;
use crate::model::*;
use crate::Result;

pub use memory::MemorySource;

/// Read access to a raw property graph.
///
/// Implementations should return `Error::SourceUnavailable` when the
/// graph cannot be reached at all and `Error::SourceError` when a read fails
/// midway. Either aborts an export. Order of the returned records does not
/// matter; the exporter sorts by internal id itself.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Check that the source is reachable before reading anything.
    ///
    /// Default: always reachable.
    async fn verify_connectivity(&self) -> Result<()> {
        Ok(())
    }

    /// Return all nodes with internal id, labels and properties.
    async fn all_nodes(&self) -> Result<Vec<Node>>;

    /// Return all relationships with internal id, endpoint ids, type and properties.
    async fn all_relationships(&self) -> Result<Vec<Relationship>>;
}

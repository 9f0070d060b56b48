//! # graph-projection — Property Graph → Filterable Render Model
//!
//! Exports a property graph into a stable, JSON-safe document and derives,
//! from that document plus live filter/style settings, exactly what a graph
//! renderer should draw.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphSource` is the contract between exporter and database
//! 2. **Stable document**: `GraphDocument` is the only thing that crosses from export to view
//! 3. **Pure projection**: degree → visibility → style are pure functions of their inputs
//! 4. **Renderer-agnostic style**: one canonical style object; renderer field names live in an adapter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graph_projection::{export, MemorySource, PropertyMap, Projector, Projection, ViewConfig, Value};
//!
//! # async fn example() -> graph_projection::Result<()> {
//! let source = MemorySource::new();
//! let mut props = PropertyMap::new();
//! props.insert("name".into(), Value::from("Ada"));
//! let ada = source.create_node(&["Person"], props);
//! let acme = source.create_node(&["Organization"], PropertyMap::new());
//! source.create_relationship(ada, acme, "WORKS_AT", PropertyMap::new());
//!
//! let document = export::export_graph(&source).await?;
//!
//! let mut projector = Projector::new(document, ViewConfig::default())?;
//! projector.set_filter("Person", false)?;
//! if let Projection::Ready(model) = projector.project() {
//!     // "Ada" is still drawn, as a ghost, because WORKS_AT touches a visible node.
//!     assert!(model.node("1").unwrap().hidden);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod source;
pub mod export;
pub mod document;
pub mod projection;
pub mod pipeline;
pub mod config;

// ============================================================================
// Re-exports: Model (raw records)
// ============================================================================

pub use model::{Node, NodeId, PropertyMap, RelId, Relationship, Value};

// ============================================================================
// Re-exports: Source / Export
// ============================================================================

pub use source::{GraphSource, MemorySource};
pub use export::{build_document, export_graph, ExportOptions};

// ============================================================================
// Re-exports: Document
// ============================================================================

pub use document::{GraphDocument, GraphNode, GraphRelationship, GraphStats};

// ============================================================================
// Re-exports: Projection
// ============================================================================

pub use projection::{
    compute_degrees, reconcile, resolve, DegreeMap, DegreeStats, FilterState,
    RenderModel, RenderNode, RenderRelationship, StyleConfig, Visibility,
};
pub use pipeline::{Projection, Projector};
pub use config::ViewConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Graph source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Graph source error: {0}")]
    SourceError(String),

    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),

    #[error("Invalid view configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

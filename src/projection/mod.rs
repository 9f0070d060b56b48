//! # Projection
//!
//! Full graph + view settings → render model. Every stage is a pure
//! function; nothing here does I/O or keeps state between calls.
//!
//! ```text
//! GraphDocument ──→ compute_degrees ─────────────────────┐
//!        │                                              ▼
//!        └──→ resolve(filters) ──→ Visibility ──→ enrich_nodes / enrich_relationships ──→ RenderModel
//! ```

pub mod degree;
pub mod filter;
pub mod visibility;
pub mod style;
pub mod render;
pub mod neighborhood;

pub use degree::{compute_degrees, DegreeMap, DegreeStats};
pub use filter::{reconcile, FilterState};
pub use visibility::{is_directly_visible, resolve, RenderCandidate, Visibility};
pub use style::{enrich_nodes, enrich_relationships, style_node, LabelSize, NodeStyle, Palette, StyleConfig};
pub use render::{RenderModel, RenderNode, RenderRelationship};
pub use neighborhood::{neighborhood, Direction, Neighborhood, RelatedNode};

use crate::document::GraphDocument;

/// Run visibility and styling over a document whose degrees are known.
pub fn project(
    document: &GraphDocument,
    degrees: &DegreeMap,
    filters: &FilterState,
    style: &StyleConfig,
) -> RenderModel {
    let visibility = resolve(&document.nodes, &document.relationships, filters);
    tracing::debug!(
        visible = visibility.visible_nodes.len(),
        ghosts = visibility.ghost_nodes.len(),
        relationships = visibility.visible_relationships.len(),
        "resolved visibility"
    );

    RenderModel {
        nodes: enrich_nodes(visibility.render_candidates(), degrees, style),
        relationships: enrich_relationships(visibility.visible_relationships.iter().copied(), style),
    }
}

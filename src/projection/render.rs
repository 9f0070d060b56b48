//! Render model — what the external renderer/layout engine receives.
//!
//! Nodes are keyed by `id`, edges by `from`/`to`. The canonical style is
//! flattened into each node; `to_renderer_json` adds the redundant field
//! names some renderers look for, so that concern stays out of the enricher.

use serde::Serialize;
use serde_json::{json, Value as Json};

use crate::document::{GraphNode, GraphRelationship};
use super::style::NodeStyle;

/// A node ready to draw. Derived; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    #[serde(flatten)]
    pub node: GraphNode,
    /// True only for ghost nodes.
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
    #[serde(flatten)]
    pub style: NodeStyle,
}

impl RenderNode {
    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn is_ghost(&self) -> bool {
        self.hidden
    }
}

/// A relationship ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRelationship {
    #[serde(flatten)]
    pub relationship: GraphRelationship,
    pub opacity: f64,
    pub width: f64,
}

impl RenderRelationship {
    pub fn id(&self) -> &str {
        &self.relationship.id
    }
}

/// The complete output of one projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderModel {
    pub nodes: Vec<RenderNode>,
    pub relationships: Vec<RenderRelationship>,
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn ghost_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.hidden).count()
    }

    /// Shape expected by NVL-style canvas renderers.
    ///
    /// Duplicates the node color into `fill`/`backgroundColor` and a nested
    /// `style` object. Edges go under `rels`.
    pub fn to_renderer_json(&self) -> Json {
        let nodes: Vec<Json> = self
            .nodes
            .iter()
            .map(|n| {
                let s = &n.style;
                json!({
                    "id": n.node.id,
                    "caption": n.node.caption,
                    "labels": n.node.labels,
                    "properties": n.node.properties,
                    "hidden": n.hidden,
                    "degree": n.degree,
                    "color": s.color,
                    "fill": s.color,
                    "backgroundColor": s.color,
                    "size": s.size,
                    "radius": s.radius,
                    "style": {
                        "fill": s.color,
                        "stroke": s.stroke,
                        "strokeWidth": s.stroke_width,
                        "opacity": s.opacity,
                    },
                    "fontColor": s.font_color,
                    "fontSize": s.font_size,
                    "fontWeight": "bold",
                })
            })
            .collect();

        let rels: Vec<Json> = self
            .relationships
            .iter()
            .map(|r| {
                let rel = &r.relationship;
                json!({
                    "id": rel.id,
                    "from": rel.from_id,
                    "to": rel.to_id,
                    "type": rel.rel_type,
                    "caption": rel.caption,
                    "properties": rel.properties,
                    "opacity": r.opacity,
                    "width": r.width,
                })
            })
            .collect();

        json!({ "nodes": nodes, "rels": rels })
    }
}

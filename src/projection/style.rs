//! Rendering attributes as a pure function of labels, degree and ghost status.
//!
//! One canonical `NodeStyle` per node. Renderer-specific field names are the
//! render-model adapter's concern (`RenderModel::to_renderer_json`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{GraphNode, GraphRelationship};
use crate::{Error, Result};
use super::degree::{DegreeMap, DegreeStats};
use super::render::{RenderNode, RenderRelationship};
use super::visibility::RenderCandidate;

/// Ghosts are drawn at 70% of a unit-size node.
pub const GHOST_SCALE: f64 = 0.7;
pub const GHOST_OPACITY: f64 = 0.3;
pub const GHOST_STROKE: &str = "#cccccc";
pub const GHOST_MIN_RADIUS: f64 = 10.0;

pub const NODE_OPACITY: f64 = 0.9;
pub const NODE_STROKE: &str = "#ffffff";
pub const NODE_MIN_RADIUS: f64 = 15.0;
pub const FONT_COLOR: &str = "#ffffff";
pub const MIN_FONT_SIZE: f64 = 12.0;
pub const MIN_STROKE_WIDTH: f64 = 2.0;

/// Degree-driven base size spans `0.5..=3.0`.
pub const DEGREE_SIZE_MIN: f64 = 0.5;
pub const DEGREE_SIZE_SPAN: f64 = 2.5;

// ============================================================================
// Configuration
// ============================================================================

/// Static label tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    /// Label → CSS color. A node takes the color of its first label found here.
    pub colors: BTreeMap<String, String>,
    pub default_color: String,
    /// Label → base size, checked in table order.
    pub base_sizes: Vec<LabelSize>,
    pub default_base_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    pub label: String,
    pub size: f64,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            ("Person", "#4A90E2"),
            ("Organization", "#50C878"),
            ("Domain", "#FF6B6B"),
        ];
        Self {
            colors: colors.iter().map(|(l, c)| (l.to_string(), c.to_string())).collect(),
            default_color: "#888888".into(),
            base_sizes: vec![
                LabelSize { label: "Person".into(), size: 2.5 },
                LabelSize { label: "Organization".into(), size: 3.5 },
            ],
            default_base_size: 2.0,
        }
    }
}

impl Palette {
    pub fn color_for(&self, node: &GraphNode) -> &str {
        node.labels
            .iter()
            .find_map(|l| self.colors.get(l))
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    pub fn base_size_for(&self, node: &GraphNode) -> f64 {
        self.base_sizes
            .iter()
            .find(|entry| node.has_label(&entry.label))
            .map(|entry| entry.size)
            .unwrap_or(self.default_base_size)
    }
}

/// Global style settings driven by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleConfig {
    pub size_multiplier: f64,
    /// Size nodes by degree instead of by label.
    pub use_degree_for_size: bool,
    pub relationship_opacity: f64,
    pub relationship_width: f64,
    pub palette: Palette,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            size_multiplier: 1.0,
            use_degree_for_size: false,
            relationship_opacity: 0.8,
            relationship_width: 2.0,
            palette: Palette::default(),
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.size_multiplier.is_finite() && self.size_multiplier > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "sizeMultiplier must be > 0, got {}",
                self.size_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.relationship_opacity) {
            return Err(Error::InvalidConfig(format!(
                "relationshipOpacity must be within [0, 1], got {}",
                self.relationship_opacity
            )));
        }
        if !(self.relationship_width.is_finite() && self.relationship_width > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "relationshipWidth must be > 0, got {}",
                self.relationship_width
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Node style
// ============================================================================

/// The canonical style object of a rendered node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub color: String,
    pub size: f64,
    /// Pixels.
    pub radius: f64,
    pub opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub font_color: String,
}

/// Style one node.
pub fn style_node(
    node: &GraphNode,
    ghost: bool,
    degree: usize,
    degree_stats: &DegreeStats,
    config: &StyleConfig,
) -> NodeStyle {
    let mult = config.size_multiplier;
    let color = config.palette.color_for(node).to_string();
    let stroke_width = (3.0 * mult).max(MIN_STROKE_WIDTH);
    let font_size = (14.0 * mult).max(MIN_FONT_SIZE);

    if ghost {
        let size = 1.0 * mult * GHOST_SCALE;
        return NodeStyle {
            color,
            size,
            radius: (size * 10.0).max(GHOST_MIN_RADIUS),
            opacity: GHOST_OPACITY,
            stroke: GHOST_STROKE.to_string(),
            stroke_width,
            font_size,
            font_color: FONT_COLOR.to_string(),
        };
    }

    let base = if config.use_degree_for_size {
        DEGREE_SIZE_MIN + DEGREE_SIZE_SPAN * degree_stats.ratio(degree)
    } else {
        config.palette.base_size_for(node)
    };
    let size = base * mult;

    NodeStyle {
        color,
        size,
        radius: (size * 10.0).max(NODE_MIN_RADIUS),
        opacity: NODE_OPACITY,
        stroke: NODE_STROKE.to_string(),
        stroke_width,
        font_size,
        font_color: FONT_COLOR.to_string(),
    }
}

/// Enrich render candidates into render nodes. Input order is kept.
///
/// Degree bounds come from the full-graph `degrees`, not from the candidates.
pub fn enrich_nodes<'g>(
    candidates: impl IntoIterator<Item = RenderCandidate<'g>>,
    degrees: &DegreeMap,
    config: &StyleConfig,
) -> Vec<RenderNode> {
    let stats = degrees.stats();
    candidates
        .into_iter()
        .map(|RenderCandidate { node, ghost }| {
            let degree = degrees.get(&node.id);
            RenderNode {
                node: node.clone(),
                hidden: ghost,
                degree,
                style: style_node(node, ghost, degree.unwrap_or(0), &stats, config),
            }
        })
        .collect()
}

/// Every relationship gets the same global stroke.
pub fn enrich_relationships<'g>(
    relationships: impl IntoIterator<Item = &'g GraphRelationship>,
    config: &StyleConfig,
) -> Vec<RenderRelationship> {
    relationships
        .into_iter()
        .map(|rel| RenderRelationship {
            relationship: rel.clone(),
            opacity: config.relationship_opacity,
            width: config.relationship_width,
        })
        .collect()
}

//! Graph export — raw database records → persisted `GraphDocument`.
//!
//! ```text
//! GraphSource ─ all_nodes() ─────────┐
//!             └ all_relationships() ─┴→ build_document() → write_document()
//!                                        (sort, renumber, normalize, stats)
//! ```
//!
//! Ids are a deterministic function of the source's internal ids: nodes are
//! numbered `"1","2",…` and relationships `"r1","r2",…` in ascending internal
//! id order, so re-exporting an unchanged graph reproduces the same ids.
//!
//! Per-record problems (duplicate internal id, unresolvable endpoint) skip the
//! record with a warning. Source failures abort the export before anything
//! is written.

pub mod normalize;

use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::document::{GraphDocument, GraphNode, GraphRelationship, Labels};
use crate::model::{Node, NodeId, Relationship, Value};
use crate::source::GraphSource;
use crate::{Error, Result};

pub use normalize::{normalize, normalize_properties};

/// Type used when the source reports none.
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "RELATED_TO";

/// Caption used for a node with neither a name nor a label.
pub const DEFAULT_NODE_CAPTION: &str = "Node";

/// Options for writing a document file.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Indented JSON (the default) or compact.
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

// ============================================================================
// Build
// ============================================================================

/// Convert raw records into a document.
///
/// Pure: the same input always yields the same document.
pub fn build_document(mut raw_nodes: Vec<Node>, mut raw_relationships: Vec<Relationship>) -> GraphDocument {
    raw_nodes.sort_by_key(|n| n.id);
    raw_relationships.sort_by_key(|r| r.id);

    let mut id_map: HashMap<NodeId, String> = HashMap::with_capacity(raw_nodes.len());
    let mut nodes = Vec::with_capacity(raw_nodes.len());

    for raw in &raw_nodes {
        if id_map.contains_key(&raw.id) {
            tracing::warn!(internal_id = %raw.id, "duplicate node id in source, skipping record");
            continue;
        }
        let id = (nodes.len() + 1).to_string();
        id_map.insert(raw.id, id.clone());
        nodes.push(export_node(raw, id));
    }

    let mut relationships = Vec::with_capacity(raw_relationships.len());
    let mut last_rel_id = None;

    for raw in &raw_relationships {
        if last_rel_id == Some(raw.id) {
            tracing::warn!(internal_id = %raw.id, "duplicate relationship id in source, skipping record");
            continue;
        }
        last_rel_id = Some(raw.id);

        let (Some(from_id), Some(to_id)) = (id_map.get(&raw.src), id_map.get(&raw.dst)) else {
            tracing::warn!(
                internal_id = %raw.id,
                src = %raw.src,
                dst = %raw.dst,
                "relationship endpoint not found among exported nodes, skipping record"
            );
            continue;
        };
        let id = format!("r{}", relationships.len() + 1);
        relationships.push(export_relationship(raw, id, from_id.clone(), to_id.clone()));
    }

    GraphDocument::new(nodes, relationships)
}

fn export_node(raw: &Node, id: String) -> GraphNode {
    let mut properties = normalize_properties(&raw.properties);
    properties.remove("labels");

    GraphNode {
        id,
        caption: node_caption(raw),
        labels: raw.labels.iter().cloned().collect::<Labels>(),
        properties,
    }
}

fn export_relationship(raw: &Relationship, id: String, from_id: String, to_id: String) -> GraphRelationship {
    let rel_type = if raw.rel_type.trim().is_empty() {
        DEFAULT_RELATIONSHIP_TYPE.to_string()
    } else {
        raw.rel_type.clone()
    };
    let mut properties = normalize_properties(&raw.properties);
    properties.remove("type");

    GraphRelationship {
        id,
        from_id,
        to_id,
        caption: rel_type.clone(),
        rel_type,
        properties,
    }
}

/// `name` if present and truthy, else the first label, else `"Node"`.
///
/// Falsy names (`""`, `0`, `false`, NaN, null) fall through to the label.
fn node_caption(raw: &Node) -> String {
    match raw.get("name").filter(|name| is_truthy(name)) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => match normalize(other) {
            serde_json::Value::String(s) => s,
            json => json.to_string(),
        },
        None => raw
            .labels
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_NODE_CAPTION.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) | Value::Int(0) => false,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

// ============================================================================
// Export from a source
// ============================================================================

/// Read the whole graph from `source` and build its document.
///
/// Any source error is fatal; a connectivity failure is reported as
/// `Error::SourceUnavailable`.
pub async fn export_graph<S: GraphSource + ?Sized>(source: &S) -> Result<GraphDocument> {
    source.verify_connectivity().await.map_err(|e| match e {
        Error::SourceUnavailable(_) => e,
        other => Error::SourceUnavailable(other.to_string()),
    })?;

    let raw_nodes = source.all_nodes().await?;
    let raw_relationships = source.all_relationships().await?;
    tracing::debug!(
        raw_nodes = raw_nodes.len(),
        raw_relationships = raw_relationships.len(),
        "read graph from source"
    );

    Ok(build_document(raw_nodes, raw_relationships))
}

/// Export `source` and write the document to `path`.
///
/// The file is only touched once the whole document has been built and
/// serialized.
pub async fn export_to_file<S: GraphSource + ?Sized>(
    source: &S,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<GraphDocument> {
    let doc = export_graph(source).await?;
    write_document(&doc, path.as_ref(), options)?;

    tracing::info!(
        path = %path.as_ref().display(),
        nodes = doc.stats.total_nodes,
        relationships = doc.stats.total_relationships,
        node_types = %doc.stats.node_types.join(", "),
        relationship_types = %doc.stats.relationship_types.join(", "),
        "exported graph document"
    );
    Ok(doc)
}

// ============================================================================
// Write
// ============================================================================

/// Write a document to `path`, creating parent directories.
///
/// Writes a sibling `.tmp` file and renames it over `path`, so readers never
/// observe a partially written document.
pub fn write_document(doc: &GraphDocument, path: impl AsRef<Path>, options: &ExportOptions) -> Result<()> {
    let path = path.as_ref();
    let json = doc.to_json(options.pretty)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = std::fs::write(&tmp, json.as_bytes()).and_then(|_| std::fs::rename(&tmp, path)) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

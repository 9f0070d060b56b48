//! # Projector — the memoized projection handle
//!
//! Owns one loaded document, its degree map (computed once per document)
//! and the current view settings. `project()` re-runs the whole projection
//! whenever any input changed and otherwise hands back the previous model.
//!
//! The memo is keyed by (document generation, view fingerprint) and a hit
//! is confirmed against the stored view. A hit returns the same `Arc`; `refresh()` drops the memo so the next call
//! yields a fresh model with equal contents but a new identity.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::ViewConfig;
use crate::document::{GraphDocument, GraphStats};
use crate::projection::{self, compute_degrees, reconcile, DegreeMap, DegreeStats, Neighborhood, RenderModel};
use crate::{Error, Result};

/// Outcome of a projection.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The document has no nodes. Distinct from a load error.
    NoData,
    Ready(Arc<RenderModel>),
}

impl Projection {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Projection::NoData)
    }

    pub fn model(&self) -> Option<&RenderModel> {
        match self {
            Projection::NoData => None,
            Projection::Ready(model) => Some(model),
        }
    }
}

struct Memo {
    generation: u64,
    fingerprint: u64,
    view: ViewConfig,
    model: Arc<RenderModel>,
}

pub struct Projector {
    document: GraphDocument,
    degrees: DegreeMap,
    view: ViewConfig,
    generation: u64,
    memo: Mutex<Option<Memo>>,
}

impl Projector {
    /// Load `document` under `view`. Filters are reconciled against the
    /// document's labels. Fails on a document with dangling endpoints or
    /// duplicate ids.
    pub fn new(document: GraphDocument, view: ViewConfig) -> Result<Self> {
        view.validate()?;
        let mut projector = Self {
            document: GraphDocument::default(),
            degrees: DegreeMap::default(),
            view,
            generation: 0,
            memo: Mutex::new(None),
        };
        projector.load(document)?;
        Ok(projector)
    }

    /// Replace the document. Degrees are recomputed and filters reconciled.
    ///
    /// An invalid document is rejected and the current one stays loaded.
    /// Stale stats are recomputed before filters are reconciled.
    pub fn load(&mut self, mut document: GraphDocument) -> Result<()> {
        document.validate()?;
        if !document.stats_are_current() {
            tracing::warn!(
                stored_nodes = document.stats.total_nodes,
                actual_nodes = document.nodes.len(),
                "loaded document has stale stats, recomputing"
            );
            document.stats = GraphStats::compute(&document.nodes, &document.relationships);
        }

        self.degrees = compute_degrees(&document.nodes, &document.relationships);
        self.view.filters = reconcile(&self.view.filters, document.labels());
        self.document = document;
        self.generation += 1;
        *self.memo.lock() = None;

        tracing::debug!(
            generation = self.generation,
            nodes = self.document.nodes.len(),
            relationships = self.document.relationships.len(),
            labels = self.view.filters.len(),
            "loaded graph document"
        );
        Ok(())
    }

    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    pub fn degrees(&self) -> &DegreeMap {
        &self.degrees
    }

    pub fn degree_stats(&self) -> DegreeStats {
        self.degrees.stats()
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Replace all view settings. Filters are re-keyed to the current labels.
    pub fn set_view(&mut self, mut view: ViewConfig) -> Result<()> {
        view.validate()?;
        view.filters = reconcile(&view.filters, self.document.labels());
        self.view = view;
        Ok(())
    }

    /// Show or hide one label. Unknown labels are rejected.
    pub fn set_filter(&mut self, label: &str, visible: bool) -> Result<()> {
        if !self.document.labels().iter().any(|l| l == label) {
            return Err(Error::NotFound(format!("label '{label}'")));
        }
        self.view.filters.set(label, visible);
        Ok(())
    }

    pub fn set_size_multiplier(&mut self, multiplier: f64) -> Result<()> {
        let mut style = self.view.style.clone();
        style.size_multiplier = multiplier;
        style.validate()?;
        self.view.style = style;
        Ok(())
    }

    pub fn set_use_degree_for_size(&mut self, enabled: bool) {
        self.view.style.use_degree_for_size = enabled;
    }

    pub fn set_relationship_style(&mut self, opacity: f64, width: f64) -> Result<()> {
        let mut style = self.view.style.clone();
        style.relationship_opacity = opacity;
        style.relationship_width = width;
        style.validate()?;
        self.view.style = style;
        Ok(())
    }

    /// Compute (or reuse) the render model for the current inputs.
    pub fn project(&self) -> Projection {
        if self.document.is_empty() {
            return Projection::NoData;
        }

        let fingerprint = self.view.fingerprint();
        let mut memo = self.memo.lock();
        if let Some(hit) = memo
            .as_ref()
            .filter(|m| m.generation == self.generation && m.fingerprint == fingerprint && m.view == self.view)
        {
            tracing::debug!(fingerprint, "projection memo hit");
            return Projection::Ready(Arc::clone(&hit.model));
        }

        tracing::debug!(fingerprint, "projection memo miss, recomputing");
        let model = Arc::new(projection::project(
            &self.document,
            &self.degrees,
            &self.view.filters,
            &self.view.style,
        ));
        *memo = Some(Memo {
            generation: self.generation,
            fingerprint,
            view: self.view.clone(),
            model: Arc::clone(&model),
        });
        Projection::Ready(model)
    }

    /// Force the next `project()` to build a new model.
    pub fn refresh(&self) {
        *self.memo.lock() = None;
    }

    pub fn neighborhood(&self, node_id: &str) -> Option<Neighborhood<'_>> {
        projection::neighborhood(&self.document, node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{GraphNode, GraphRelationship};

    fn doc() -> GraphDocument {
        GraphDocument::new(
            vec![
                GraphNode::new("1").with_labels(["Person"]),
                GraphNode::new("2").with_labels(["Organization"]),
            ],
            vec![GraphRelationship::new("r1", "1", "2", "WORKS_AT")],
        )
    }

    #[test]
    fn test_memo_hit_returns_same_arc() {
        let p = Projector::new(doc(), ViewConfig::default()).unwrap();
        let (Projection::Ready(a), Projection::Ready(b)) = (p.project(), p.project()) else {
            panic!("expected a model");
        };
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_refresh_changes_identity_not_content() {
        let p = Projector::new(doc(), ViewConfig::default()).unwrap();
        let Projection::Ready(a) = p.project() else { panic!("expected a model") };
        p.refresh();
        let Projection::Ready(b) = p.project() else { panic!("expected a model") };
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_setting_change_recomputes() {
        let mut p = Projector::new(doc(), ViewConfig::default()).unwrap();
        let Projection::Ready(before) = p.project() else { panic!("expected a model") };
        p.set_filter("Person", false).unwrap();
        let Projection::Ready(after) = p.project() else { panic!("expected a model") };
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(after.node("1").unwrap().hidden);
    }

    #[test]
    fn test_load_reconciles_filters() {
        let view = ViewConfig::default()
            .with_filters(crate::projection::FilterState::new().with("Person", false).with("Stale", false));
        let p = Projector::new(doc(), view).unwrap();
        let filters: Vec<_> = p.view().filters.iter().collect();
        assert_eq!(filters, vec![("Organization", true), ("Person", false)]);
    }

    #[test]
    fn test_dangling_endpoint_rejected() {
        let dangling = GraphDocument::new(
            vec![GraphNode::new("1").with_labels(["Person"])],
            vec![GraphRelationship::new("r1", "1", "9", "KNOWS")],
        );
        let err = Projector::new(dangling.clone(), ViewConfig::default()).err();
        assert!(matches!(err, Some(Error::InvalidDocument(_))));

        let mut p = Projector::new(doc(), ViewConfig::default()).unwrap();
        assert!(matches!(p.load(dangling), Err(Error::InvalidDocument(_))));
        // previous document still loaded
        assert_eq!(p.document().nodes.len(), 2);
        assert!(p.project().model().is_some_and(|m| m.relationships.len() == 1));
    }

    #[test]
    fn test_stale_stats_recomputed_on_load() {
        let mut doc = doc();
        doc.stats = GraphStats::default();
        let mut p = Projector::new(doc, ViewConfig::default()).unwrap();

        assert_eq!(p.document().stats.node_types, vec!["Organization", "Person"]);
        let filters: Vec<_> = p.view().filters.iter().collect();
        assert_eq!(filters, vec![("Organization", true), ("Person", true)]);
        assert!(p.set_filter("Person", false).is_ok());
    }

    #[test]
    fn test_memo_checks_view_not_just_fingerprint() {
        let p = Projector::new(doc(), ViewConfig::default()).unwrap();
        let Projection::Ready(cached) = p.project() else { panic!("expected a model") };

        // Plant a memo whose fingerprint matches but whose view differs.
        let mut other = ViewConfig::default();
        other.style.size_multiplier = 3.0;
        {
            let mut memo = p.memo.lock();
            let entry = memo.as_mut().unwrap();
            entry.view = other;
        }
        let Projection::Ready(fresh) = p.project() else { panic!("expected a model") };
        assert!(!Arc::ptr_eq(&cached, &fresh));
        assert_eq!(*cached, *fresh);
    }

    #[test]
    fn test_empty_document_is_no_data() {
        let p = Projector::new(GraphDocument::default(), ViewConfig::default()).unwrap();
        assert!(p.project().is_no_data());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut p = Projector::new(doc(), ViewConfig::default()).unwrap();
        assert!(matches!(p.set_size_multiplier(0.0), Err(Error::InvalidConfig(_))));
        assert!(matches!(p.set_relationship_style(1.2, 1.0), Err(Error::InvalidConfig(_))));
        assert!(matches!(p.set_filter("Nope", false), Err(Error::NotFound(_))));
        assert_eq!(p.view().style.size_multiplier, 1.0);
    }
}

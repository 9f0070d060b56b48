//! Connection counts over the complete, unfiltered graph.

use hashbrown::HashMap;
use serde::Serialize;

use crate::document::{GraphNode, GraphRelationship};

/// Node id → number of relationship endpoints at that node.
///
/// A self-loop counts twice, once per endpoint role, so the values always
/// sum to `2 * relationships.len()` for a valid document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeMap {
    degrees: HashMap<String, usize>,
}

/// Min / max / mean over a `DegreeMap`. All zero for an empty graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
}

/// Compute degrees for every node. Linear in `|nodes| + |relationships|`.
///
/// Endpoints that name no node are ignored.
pub fn compute_degrees(nodes: &[GraphNode], relationships: &[GraphRelationship]) -> DegreeMap {
    let mut degrees: HashMap<String, usize> = nodes.iter().map(|n| (n.id.clone(), 0)).collect();

    for rel in relationships {
        for endpoint in [&rel.from_id, &rel.to_id] {
            match degrees.get_mut(endpoint.as_str()) {
                Some(d) => *d += 1,
                None => tracing::warn!(relationship = %rel.id, node = %endpoint, "degree of unknown node ignored"),
            }
        }
    }

    DegreeMap { degrees }
}

impl DegreeMap {
    pub fn get(&self, node_id: &str) -> Option<usize> {
        self.degrees.get(node_id).copied()
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    pub fn total(&self) -> usize {
        self.degrees.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.degrees.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn stats(&self) -> DegreeStats {
        if self.degrees.is_empty() {
            return DegreeStats::default();
        }
        let min = self.degrees.values().copied().min().unwrap_or(0);
        let max = self.degrees.values().copied().max().unwrap_or(0);
        let avg = self.total() as f64 / self.degrees.len() as f64;
        DegreeStats { min, max, avg }
    }
}

impl DegreeStats {
    /// Position of `degree` within `[min, max]`, in `0.0..=1.0`.
    ///
    /// Zero when every node has the same degree.
    pub fn ratio(&self, degree: usize) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        (degree.saturating_sub(self.min)) as f64 / (self.max - self.min) as f64
    }
}

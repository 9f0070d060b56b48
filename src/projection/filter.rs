//! Per-label visibility switches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label → shown. Labels without an entry are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    labels: BTreeMap<String, bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every label in `labels` shown.
    pub fn all_visible<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { labels: labels.into_iter().map(|l| (l.into(), true)).collect() }
    }

    pub fn is_visible(&self, label: &str) -> bool {
        self.labels.get(label).copied().unwrap_or(true)
    }

    pub fn set(&mut self, label: impl Into<String>, visible: bool) {
        self.labels.insert(label.into(), visible);
    }

    pub fn with(mut self, label: impl Into<String>, visible: bool) -> Self {
        self.set(label, visible);
        self
    }

    /// Flip one label, returning its new state.
    pub fn toggle(&mut self, label: &str) -> bool {
        let next = !self.is_visible(label);
        self.labels.insert(label.to_string(), next);
        next
    }

    pub fn show_all(&mut self) {
        self.labels.values_mut().for_each(|v| *v = true);
    }

    pub fn hide_all(&mut self) {
        self.labels.values_mut().for_each(|v| *v = false);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self { labels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// Re-key `old` against the labels of a freshly loaded graph.
///
/// Keeps the setting of every label still present, drops labels that
/// disappeared, and shows labels seen for the first time.
pub fn reconcile<S: AsRef<str>>(old: &FilterState, current_labels: &[S]) -> FilterState {
    current_labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            (label.to_string(), old.is_visible(label))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_label_is_visible() {
        let f = FilterState::new().with("Person", false);
        assert!(!f.is_visible("Person"));
        assert!(f.is_visible("Organization"));
    }

    #[test]
    fn test_reconcile_keeps_drops_and_adds() {
        let old = FilterState::new().with("Person", false).with("Gone", false).with("Domain", true);
        let next = reconcile(&old, &["Domain", "Organization", "Person"]);

        let entries: Vec<_> = next.iter().collect();
        assert_eq!(entries, vec![("Domain", true), ("Organization", true), ("Person", false)]);
    }

    #[test]
    fn test_reconcile_empty_labels_clears() {
        let old = FilterState::all_visible(["A", "B"]);
        assert!(reconcile::<&str>(&old, &[]).is_empty());
    }

    #[test]
    fn test_toggle_and_bulk() {
        let mut f = FilterState::all_visible(["A", "B"]);
        assert!(!f.toggle("A"));
        assert!(f.toggle("A"));
        f.hide_all();
        assert!(!f.is_visible("A") && !f.is_visible("B"));
        f.show_all();
        assert!(f.is_visible("A") && f.is_visible("B"));
    }

    #[test]
    fn test_serde_is_plain_map() {
        let f = FilterState::new().with("Person", false);
        assert_eq!(serde_json::to_string(&f).unwrap(), r#"{"Person":false}"#);
        let back: FilterState = serde_json::from_str(r#"{"Person":false}"#).unwrap();
        assert_eq!(back, f);
    }
}

//! PropertyMap — the key-value store on nodes and relationships.

use std::collections::BTreeMap;
use super::Value;

/// A map of property names to values.
///
/// Ordered by key so that two reads of the same record always iterate
/// (and therefore export) in the same order.
pub type PropertyMap = BTreeMap<String, Value>;

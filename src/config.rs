//! View configuration — the options the UI layer hands to the projection.
//!
//! Wire shape (all keys optional, defaults shown):
//!
//! ```json
//! {
//!   "sizeMultiplier": 1.0,
//!   "useDegreeForSize": false,
//!   "relationshipOpacity": 0.8,
//!   "relationshipWidth": 2.0,
//!   "palette": { "colors": {...}, "defaultColor": "#888888", "baseSizes": [...], "defaultBaseSize": 2.0 },
//!   "filters": { "Person": true, "Organization": false }
//! }
//! ```

use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::projection::{FilterState, StyleConfig};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    #[serde(flatten)]
    pub style: StyleConfig,
    pub filters: FilterState,
}

impl ViewConfig {
    pub fn validate(&self) -> Result<()> {
        self.style.validate()
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Hash of every field that affects the render model.
    ///
    /// Floats hash by bit pattern, so `0.0` and `-0.0` differ. That only
    /// costs a cache miss.
    pub fn fingerprint(&self) -> u64 {
        let mut h = std::collections::hash_map::DefaultHasher::new();
        let s = &self.style;
        s.size_multiplier.to_bits().hash(&mut h);
        s.use_degree_for_size.hash(&mut h);
        s.relationship_opacity.to_bits().hash(&mut h);
        s.relationship_width.to_bits().hash(&mut h);

        let p = &s.palette;
        p.colors.hash(&mut h);
        p.default_color.hash(&mut h);
        p.base_sizes.len().hash(&mut h);
        for entry in &p.base_sizes {
            entry.label.hash(&mut h);
            entry.size.to_bits().hash(&mut h);
        }
        p.default_base_size.to_bits().hash(&mut h);

        self.filters.hash(&mut h);
        h.finish()
    }
}

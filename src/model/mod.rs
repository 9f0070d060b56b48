//! # Source Property Graph Model
//!
//! DTOs for records exactly as the graph database returns them: internal
//! numeric ids, driver-native values (temporal, spatial, bytes).
//! These types never reach the persisted document; `export` converts them.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, RelId};
pub use path::Path;
pub use value::{Value, IsoDuration};
pub use property_map::PropertyMap;

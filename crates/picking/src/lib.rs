//! Hotspot Picker: nearest interactable along the view ray, resolved to a
//! catalog entry.
//!
//! # Invariants
//! - A pick never surfaces a node without an item back-reference on itself
//!   or an ancestor.
//! - "Nothing hit" is a normal outcome, not an error.

pub mod catalog;
pub mod picker;

pub use catalog::{Catalog, CatalogEntry, CatalogError, FurnitureKind};
pub use picker::{Hit, HotspotPicker, Selection, SpatialQuery};

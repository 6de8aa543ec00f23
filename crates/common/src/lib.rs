//! Shared value types used by every showroom crate.
//!
//! # Invariants
//! - Types here are plain data; no crate in the workspace owns them exclusively.
//! - Coordinates are right-handed, Y up, the default view looks down -Z.

mod pose;
mod types;

pub use pose::CameraPose;
pub use types::{Aabb, ItemId, NodeId, Ray, hex_to_rgba};

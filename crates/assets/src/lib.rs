//! Asset loading for the showroom's surfaces.
//!
//! Each surface names an ordered list of material descriptor sources. They
//! are tried one after another off the frame loop; the first success wins,
//! and exhaustion falls back to a built-in material with a recorded warning.
//!
//! # Invariants
//! - Loading never blocks the frame loop and never fails fatally.
//! - Until a load resolves, the surface renders with its built-in material.

mod fallback;
mod library;
mod material;

pub use fallback::{AssetError, Loaded, PendingLoad, load_first, spawn_load};
pub use library::MaterialLibrary;
pub use material::{Material, Surface};

pub fn crate_info() -> &'static str {
    "showroom-assets v0.1.0"
}

//! Rendering Adapter: the renderer-agnostic side of the showroom.
//!
//! # Invariants
//! - Renderers read the scene and a view; they never mutate either.
//! - The scene graph is the only spatial query the picker sees; only
//!   registered pickable subtrees answer it.
//!
//! The scene is made of axis-aligned boxes. Set dressing approximates
//! curved furniture with its bounding boxes, which is also what picking uses.

pub mod dressing;
pub mod minimap;
mod renderer;
pub mod scene;

pub use dressing::build_showroom;
pub use minimap::{MinimapFrame, MinimapLayout};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use scene::{NodeKind, SceneGraph, SceneNode};

pub fn crate_info() -> &'static str {
    "showroom-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}

//! wgpu render backend for the showroom.
//!
//! Draws every box of a [`showroom_render::SceneGraph`] as one instanced
//! cube, lit with a key light and a simple specular term driven by the
//! node's material.
//!
//! # Invariants
//! - The renderer never mutates the scene or the session.
//! - Projection aspect and depth target follow the surface size.

mod camera;
mod gpu;
mod instances;
mod shaders;

pub use camera::Projection;
pub use gpu::WgpuRenderer;
pub use instances::{InstanceData, build_instances};

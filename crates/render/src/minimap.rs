//! Top-down minimap layout. Pure math; the host draws the result.

use crate::dressing::{ROOM_DEPTH, ROOM_WIDTH};
use glam::{Vec2, Vec3};
use showroom_common::CameraPose;
use showroom_picking::Catalog;

/// Length of the heading line, in world units.
pub const HEADING_LENGTH: f32 = 2.0;
pub const ITEM_RADIUS: f32 = 4.0;
pub const PLAYER_RADIUS: f32 = 5.0;

/// Maps the room's floor plan onto a `width` x `height` canvas, world `-X`
/// on the left and `-Z` at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapLayout {
    pub width: f32,
    pub height: f32,
    /// World extent covered, on X and Z.
    pub range: Vec2,
}

/// What to draw for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimapFrame {
    pub items: Vec<Vec2>,
    pub player: Vec2,
    pub heading_end: Vec2,
}

impl MinimapLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            range: Vec2::new(ROOM_WIDTH, ROOM_DEPTH),
        }
    }

    pub fn to_map(&self, x: f32, z: f32) -> Vec2 {
        Vec2::new(
            (x + self.range.x / 2.0) / self.range.x * self.width,
            (z + self.range.y / 2.0) / self.range.y * self.height,
        )
    }

    fn project(&self, p: Vec3) -> Vec2 {
        self.to_map(p.x, p.z)
    }

    pub fn frame(&self, catalog: &Catalog, pose: &CameraPose) -> MinimapFrame {
        let dir = pose.forward();
        MinimapFrame {
            items: catalog.iter().map(|e| self.project(e.position)).collect(),
            player: self.project(pose.position),
            heading_end: self.project(pose.position + dir * HEADING_LENGTH),
        }
    }
}

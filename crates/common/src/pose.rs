use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// First-person camera pose: eye position plus yaw/pitch look angles.
///
/// Yaw rotates about +Y, pitch about the camera's local X axis (YXZ order).
/// Zero yaw and pitch looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.7, 9.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Camera right axis. Depends on yaw only, so it stays defined when
    /// looking straight up or down.
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Forward projected onto the ground plane (`up x right`).
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::Y.cross(self.right())
    }

    /// Walk along the horizontal forward axis.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.horizontal_forward() * distance;
    }

    /// Strafe along the right axis.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        let up = self.right().cross(forward);
        Mat4::look_to_rh(self.position, forward, up)
    }
}

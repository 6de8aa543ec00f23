use glam::Mat4;
use showroom_common::CameraPose;

/// Perspective projection for the first-person camera. The view side comes
/// from [`CameraPose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 70.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 250.0,
        }
    }
}

impl Projection {
    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.fov_y = degrees.clamp(10.0, 150.0).to_radians();
        self
    }

    /// Follow a new viewport size. Zero sizes (minimised windows) keep the
    /// previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.matrix() * pose.view_matrix()
    }
}

/// Eye position padded for a uniform slot.
pub(crate) fn eye(pose: &CameraPose) -> [f32; 4] {
    pose.position.extend(1.0).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn point_ahead_lands_in_clip_volume() {
        let proj = Projection::default();
        let pose = CameraPose::default();
        let vp = proj.view_projection(&pose);
        let p = vp * Vec4::new(0.0, 1.7, 0.0, 1.0);
        let ndc = p.truncate() / p.w;
        assert!(p.w > 0.0);
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn point_behind_is_clipped() {
        let vp = Projection::default().view_projection(&CameraPose::default());
        let p = vp * Vec4::new(0.0, 1.7, 12.0, 1.0);
        assert!(p.w < 0.0);
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut proj = Projection::default();
        proj.set_viewport(800, 400);
        assert_eq!(proj.aspect, 2.0);
        proj.set_viewport(0, 400);
        assert_eq!(proj.aspect, 2.0);
    }

    #[test]
    fn vertical_look_is_finite() {
        let pose = CameraPose::new(Vec3::new(0.0, 1.7, 9.0), 0.3, std::f32::consts::FRAC_PI_2);
        let vp = Projection::default().view_projection(&pose);
        assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    }
}

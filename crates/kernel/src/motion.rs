use glam::Vec2;
use serde::{Deserialize, Serialize};
use showroom_common::CameraPose;
use showroom_input::IntentState;

/// Tunables for first-person movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of velocity shed per second.
    pub damping: f32,
    /// Acceleration applied per second of held input.
    pub base_speed: f32,
    /// Multiplier on `base_speed` while sprinting.
    pub sprint_boost: f32,
    /// Eye height band.
    pub min_height: f32,
    pub max_height: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            damping: 8.0,
            base_speed: 6.0,
            sprint_boost: 1.7,
            min_height: 1.0,
            max_height: 2.8,
        }
    }
}

impl MotionConfig {
    pub fn clamp_height(&self, y: f32) -> f32 {
        y.clamp(self.min_height, self.max_height)
    }
}

/// Damped-velocity integrator driving a [`CameraPose`].
///
/// Velocity is kept in camera-local space: `x` strafe, `y` forward (the
/// local z axis). Stored velocity points opposite to travel, so positive
/// `y` walks the camera backward.
#[derive(Debug, Clone, Default)]
pub struct MotionIntegrator {
    config: MotionConfig,
    velocity: Vec2,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            velocity: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Advance one frame of `dt` seconds. Negative or non-finite `dt` counts
    /// as zero.
    pub fn step(&mut self, intent: IntentState, pose: &mut CameraPose, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        // Floored at zero: one long frame stops the camera, never reverses it.
        let decay = (1.0 - self.config.damping * dt).max(0.0);
        self.velocity *= decay;

        let direction = Vec2::new(intent.strafe_axis(), intent.forward_axis()).normalize_or_zero();
        let speed = if intent.sprint {
            self.config.base_speed * self.config.sprint_boost
        } else {
            self.config.base_speed
        };

        if intent.forward || intent.backward {
            self.velocity.y -= direction.y * speed * dt;
        }
        if intent.left || intent.right {
            self.velocity.x -= direction.x * speed * dt;
        }

        pose.move_right(-self.velocity.x * dt);
        pose.move_forward(-self.velocity.y * dt);
        pose.position.y = self.config.clamp_height(pose.position.y);
    }
}

//! Showroom kernel: the per-frame interaction core.
//!
//! # Invariants
//! - The session is the only owner of the camera pose and velocity; the host
//!   passes events in and reads state back out.
//! - Within a frame, input is applied before `tick`, which precedes rendering.
//! - The pose only moves while pointer capture is held.

pub mod config;
pub mod motion;
pub mod session;

pub use config::{ConfigError, ShowroomConfig};
pub use motion::{MotionConfig, MotionIntegrator};
pub use session::{Hint, InfoPanel, Response, Session, ShowroomMode};

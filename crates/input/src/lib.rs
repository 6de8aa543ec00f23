//! Input State Tracker: raw key, mouse-delta and capture signals mapped to a
//! persistent intent state.
//!
//! # Invariants
//! - Pitch is always within [-pi/2, pi/2].
//! - Look deltas are only accepted while capture is LOCKED.
//! - Mode transitions come from the pointer-capture collaborator's signals,
//!   never from the tracker itself.

pub mod bindings;
pub mod capture;
pub mod event;
pub mod tracker;

pub use bindings::{Control, KeyBindings};
pub use capture::{CaptureError, CaptureMode, CaptureSignal, PointerCapture};
pub use event::InputEvent;
pub use tracker::{DEFAULT_LOOK_SENSITIVITY, InputTracker, IntentState, LookOrientation};

use crate::bindings::{Control, KeyBindings};
use crate::capture::{CaptureError, CaptureMode, CaptureSignal, PointerCapture};
use std::f32::consts::FRAC_PI_2;

/// Radians of rotation per mouse count.
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.002;

/// Held movement controls for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl IntentState {
    /// `forward - backward`, in {-1, 0, 1}.
    pub fn forward_axis(&self) -> f32 {
        f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward))
    }

    /// `right - left`, in {-1, 0, 1}.
    pub fn strafe_axis(&self) -> f32 {
        f32::from(u8::from(self.right)) - f32::from(u8::from(self.left))
    }

    pub fn has_movement(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::MoveForward => self.forward = pressed,
            Control::MoveBackward => self.backward = pressed,
            Control::MoveLeft => self.left = pressed,
            Control::MoveRight => self.right = pressed,
            Control::Sprint => self.sprint = pressed,
        }
    }
}

/// Yaw/pitch look angles in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookOrientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
        }
    }
}

/// Converts raw input into [`IntentState`] and [`LookOrientation`].
#[derive(Debug, Clone)]
pub struct InputTracker {
    bindings: KeyBindings,
    intent: IntentState,
    look: LookOrientation,
    mode: CaptureMode,
    sensitivity: f32,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(KeyBindings::default(), DEFAULT_LOOK_SENSITIVITY)
    }
}

impl InputTracker {
    pub fn new(bindings: KeyBindings, sensitivity: f32) -> Self {
        Self {
            bindings,
            intent: IntentState::default(),
            look: LookOrientation::default(),
            mode: CaptureMode::Unlocked,
            sensitivity,
        }
    }

    pub fn with_look(mut self, look: LookOrientation) -> Self {
        self.look = LookOrientation::new(look.yaw, look.pitch);
        self
    }

    pub fn intent(&self) -> IntentState {
        self.intent
    }

    pub fn look(&self) -> LookOrientation {
        self.look
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.mode == CaptureMode::Locked
    }

    /// Update the flag bound to `code`. Returns `false` for unbound codes,
    /// which are otherwise ignored.
    pub fn on_key_change(&mut self, code: &str, pressed: bool) -> bool {
        match self.bindings.control_for(code) {
            Some(control) => {
                self.intent.set(control, pressed);
                tracing::debug!(code, pressed, ?control, "key");
                true
            }
            None => false,
        }
    }

    /// Apply relative mouse motion. Ignored unless LOCKED.
    pub fn on_look_delta(&mut self, dx: f32, dy: f32) {
        if !self.is_locked() || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.look.yaw -= dx * self.sensitivity;
        self.look.pitch = (self.look.pitch - dy * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Ask the host for capture. The mode only changes once the host reports
    /// back with a [`CaptureSignal`].
    pub fn request_capture(&self, host: &mut dyn PointerCapture) -> Result<(), CaptureError> {
        if !host.is_supported() {
            return Err(CaptureError::Unavailable);
        }
        host.lock()
    }

    /// Apply a signal from the capture collaborator and return the new mode.
    ///
    /// Leaving LOCKED releases every held control.
    pub fn on_capture_signal(&mut self, signal: CaptureSignal) -> CaptureMode {
        let next = match signal {
            CaptureSignal::Locked => CaptureMode::Locked,
            CaptureSignal::Unlocked | CaptureSignal::Error => CaptureMode::Unlocked,
        };
        if next == CaptureMode::Unlocked && self.mode == CaptureMode::Locked {
            self.intent = IntentState::default();
        }
        if next != self.mode {
            tracing::debug!(?signal, from = ?self.mode, to = ?next, "capture mode");
        }
        self.mode = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHost {
        supported: bool,
        reject: bool,
        lock_calls: usize,
    }

    impl PointerCapture for FakeHost {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn lock(&mut self) -> Result<(), CaptureError> {
            self.lock_calls += 1;
            if self.reject {
                Err(CaptureError::Rejected("denied".into()))
            } else {
                Ok(())
            }
        }

        fn unlock(&mut self) {}
    }

    fn locked() -> InputTracker {
        let mut t = InputTracker::default();
        t.on_capture_signal(CaptureSignal::Locked);
        t
    }

    #[test]
    fn key_changes_update_flags() {
        let mut t = InputTracker::default();
        assert!(t.on_key_change("KeyW", true));
        assert!(t.on_key_change("ShiftLeft", true));
        assert!(t.intent().forward);
        assert!(t.intent().sprint);
        assert!(t.on_key_change("KeyW", false));
        assert!(!t.intent().forward);
    }

    #[test]
    fn unknown_codes_are_ignored() {
        let mut t = InputTracker::default();
        assert!(!t.on_key_change("KeyQ", true));
        assert_eq!(t.intent(), IntentState::default());
    }

    #[test]
    fn axes_cancel_out() {
        let intent = IntentState {
            forward: true,
            backward: true,
            left: true,
            ..IntentState::default()
        };
        assert_eq!(intent.forward_axis(), 0.0);
        assert_eq!(intent.strafe_axis(), -1.0);
        assert!(intent.has_movement());
    }

    #[test]
    fn look_ignored_while_unlocked() {
        let mut t = InputTracker::default();
        t.on_look_delta(100.0, 100.0);
        assert_eq!(t.look(), LookOrientation::default());
    }

    #[test]
    fn look_applies_sensitivity_and_sign() {
        let mut t = locked();
        t.on_look_delta(10.0, -5.0);
        assert!((t.look().yaw + 10.0 * DEFAULT_LOOK_SENSITIVITY).abs() < 1e-6);
        assert!((t.look().pitch - 5.0 * DEFAULT_LOOK_SENSITIVITY).abs() < 1e-6);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut t = locked();
        for dy in [1e4, -3e4, 5e3, 7e6, -1e9, 42.0] {
            t.on_look_delta(0.0, dy);
            assert!(t.look().pitch.abs() <= FRAC_PI_2);
        }
        t.on_look_delta(0.0, -1e6);
        assert_eq!(t.look().pitch, FRAC_PI_2);
    }

    #[test]
    fn non_finite_delta_dropped() {
        let mut t = locked();
        t.on_look_delta(f32::NAN, 1.0);
        t.on_look_delta(1.0, f32::INFINITY);
        assert_eq!(t.look(), LookOrientation::default());
    }

    #[test]
    fn unsupported_host_reports_unavailable() {
        let t = InputTracker::default();
        let mut host = FakeHost {
            supported: false,
            reject: false,
            lock_calls: 0,
        };
        assert_eq!(t.request_capture(&mut host), Err(CaptureError::Unavailable));
        assert_eq!(host.lock_calls, 0);
        assert_eq!(t.mode(), CaptureMode::Unlocked);
    }

    #[test]
    fn request_does_not_change_mode_by_itself() {
        let t = InputTracker::default();
        let mut host = FakeHost {
            supported: true,
            reject: false,
            lock_calls: 0,
        };
        assert!(t.request_capture(&mut host).is_ok());
        assert_eq!(host.lock_calls, 1);
        assert_eq!(t.mode(), CaptureMode::Unlocked);
    }

    #[test]
    fn error_signal_unlocks_and_releases_keys() {
        let mut t = locked();
        t.on_key_change("KeyD", true);
        assert_eq!(t.on_capture_signal(CaptureSignal::Error), CaptureMode::Unlocked);
        assert!(!t.intent().right);
    }
}

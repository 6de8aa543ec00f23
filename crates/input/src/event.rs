use crate::capture::CaptureSignal;

/// A host input event, already stripped of platform types.
///
/// The desktop host and the headless CLI both feed the session through this
/// enum, so they share the same interaction logic.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key changed state. `code` is the physical key name (`"KeyW"`).
    Key { code: String, pressed: bool },
    /// Relative mouse motion, meaningful only while captured.
    LookDelta { dx: f32, dy: f32 },
    /// Primary mouse button went down.
    PrimaryClick,
    /// The info panel's close action.
    ClosePanel,
    /// A signal from the pointer-capture collaborator.
    Capture(CaptureSignal),
}

impl InputEvent {
    pub fn key(code: impl Into<String>, pressed: bool) -> Self {
        Self::Key {
            code: code.into(),
            pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_constructor() {
        let e = InputEvent::key("KeyW", true);
        assert_eq!(
            e,
            InputEvent::Key {
                code: "KeyW".into(),
                pressed: true
            }
        );
    }

    #[test]
    fn capture_event_wraps_signal() {
        let e = InputEvent::Capture(CaptureSignal::Error);
        assert!(matches!(e, InputEvent::Capture(CaptureSignal::Error)));
    }
}

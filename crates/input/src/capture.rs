//! Pointer capture: the exclusive mouse mode that hides the cursor and
//! delivers raw relative motion.

/// Whether the tracker currently owns the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    Unlocked,
    Locked,
}

/// Signals emitted by the host's pointer-capture collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSignal {
    /// Capture was granted.
    Locked,
    /// Capture was released, by the user or lost externally.
    Unlocked,
    /// A capture request was rejected at runtime.
    Error,
}

/// Reasons a capture request cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("pointer capture is not supported by this host")]
    Unavailable,
    #[error("pointer capture was rejected: {0}")]
    Rejected(String),
}

/// Host-side pointer capture.
///
/// `lock` only issues the request; the resulting mode change is reported
/// back through [`CaptureSignal`]s.
pub trait PointerCapture {
    fn is_supported(&self) -> bool;

    fn lock(&mut self) -> Result<(), CaptureError>;

    fn unlock(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_unlocked() {
        assert_eq!(CaptureMode::default(), CaptureMode::Unlocked);
    }

    #[test]
    fn rejected_error_message() {
        let e = CaptureError::Rejected("window not focused".into());
        assert!(e.to_string().contains("window not focused"));
    }
}

use showroom_input::{CaptureError, CaptureSignal, PointerCapture};
use std::sync::Arc;
use winit::error::ExternalError;
use winit::window::{CursorGrabMode, Window};

/// Pointer capture backed by winit's cursor grab.
///
/// winit answers grab requests synchronously, so the outcome is queued as a
/// [`CaptureSignal`] for the app to feed back into the session.
pub struct WinitCapture {
    window: Arc<Window>,
    signals: Vec<CaptureSignal>,
    grabbed: bool,
}

impl WinitCapture {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            signals: Vec::new(),
            grabbed: false,
        }
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn drain_signals(&mut self) -> Vec<CaptureSignal> {
        std::mem::take(&mut self.signals)
    }
}

impl PointerCapture for WinitCapture {
    fn is_supported(&self) -> bool {
        true
    }

    fn lock(&mut self) -> Result<(), CaptureError> {
        let grab = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grab {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.grabbed = true;
                self.signals.push(CaptureSignal::Locked);
                Ok(())
            }
            Err(ExternalError::NotSupported(_)) => Err(CaptureError::Unavailable),
            Err(e) => {
                self.signals.push(CaptureSignal::Error);
                Err(CaptureError::Rejected(e.to_string()))
            }
        }
    }

    fn unlock(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::debug!("cursor release failed: {e}");
        }
        self.window.set_cursor_visible(true);
        if self.grabbed {
            self.grabbed = false;
            self.signals.push(CaptureSignal::Unlocked);
        }
    }
}

use crate::config::{ConfigError, ShowroomConfig};
use crate::motion::{MotionConfig, MotionIntegrator};
use glam::Vec2;
use showroom_common::{CameraPose, ItemId};
use showroom_input::{
    CaptureError, CaptureSignal, InputEvent, InputTracker, IntentState, LookOrientation,
    PointerCapture,
};
use showroom_picking::{Catalog, HotspotPicker, SpatialQuery};

/// Combined pointer-capture and info-panel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowroomMode {
    Unlocked,
    Locked,
    LockedWithPanel,
}

/// Guidance line shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Enter,
    Exploring,
    CaptureUnavailable,
    CaptureBlocked,
}

impl Hint {
    pub fn text(&self) -> &'static str {
        match self {
            Hint::Enter => "Click to enter - WASD move - Shift sprint - Mouse look - Click for details",
            Hint::Exploring => "WASD move, Shift sprint, mouse look, click for details.",
            Hint::CaptureUnavailable => {
                "Pointer lock is not available on this platform. Use a desktop session with a mouse."
            }
            Hint::CaptureBlocked => "Pointer lock was blocked. Click the window to try again.",
        }
    }
}

/// Contents of the open info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPanel {
    pub item: ItemId,
    pub title: String,
    pub body: String,
}

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Nothing,
    /// A click arrived while uncaptured; the host should ask for capture.
    RequestCapture,
    /// A pick succeeded and the info panel now shows this item.
    Selected(ItemId),
}

/// The frame-loop context: everything the interaction core owns.
///
/// The host applies input events between frames, calls [`Session::tick`]
/// once per frame, then renders from [`Session::pose`].
#[derive(Debug, Clone)]
pub struct Session {
    tracker: InputTracker,
    motion: MotionIntegrator,
    pose: CameraPose,
    picker: HotspotPicker,
    catalog: Catalog,
    panel: Option<InfoPanel>,
    hint: Hint,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self::assemble(
            catalog,
            MotionConfig::default(),
            InputTracker::default(),
            HotspotPicker::default(),
            CameraPose::default(),
        )
    }

    pub fn from_config(config: &ShowroomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = config.catalog()?;
        let tracker = InputTracker::new(config.key_bindings(), config.look_sensitivity);
        let picker = match config.pick_range {
            Some(range) => HotspotPicker::with_max_distance(range),
            None => HotspotPicker::default(),
        };
        Ok(Self::assemble(catalog, config.motion, tracker, picker, config.start))
    }

    fn assemble(
        catalog: Catalog,
        motion: MotionConfig,
        tracker: InputTracker,
        picker: HotspotPicker,
        mut start: CameraPose,
    ) -> Self {
        start.position.y = motion.clamp_height(start.position.y);
        let tracker = tracker.with_look(LookOrientation::new(start.yaw, start.pitch));
        let look = tracker.look();
        start.yaw = look.yaw;
        start.pitch = look.pitch;
        tracing::info!(items = catalog.len(), "showroom session ready");
        Self {
            tracker,
            motion: MotionIntegrator::new(motion),
            pose: start,
            picker,
            catalog,
            panel: None,
            hint: Hint::Enter,
        }
    }

    pub fn mode(&self) -> ShowroomMode {
        match (self.tracker.is_locked(), self.panel.is_some()) {
            (false, _) => ShowroomMode::Unlocked,
            (true, false) => ShowroomMode::Locked,
            (true, true) => ShowroomMode::LockedWithPanel,
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity()
    }

    pub fn intent(&self) -> IntentState {
        self.tracker.intent()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn panel(&self) -> Option<&InfoPanel> {
        self.panel.as_ref()
    }

    pub fn hint(&self) -> Hint {
        self.hint
    }

    /// The "enter" button is offered exactly while uncaptured.
    pub fn show_enter_affordance(&self) -> bool {
        !self.tracker.is_locked()
    }

    /// Ask the host for pointer capture. Failures leave the session
    /// UNLOCKED with a guidance hint; they are never fatal.
    pub fn request_capture(&mut self, host: &mut dyn PointerCapture) -> Result<(), CaptureError> {
        let result = self.tracker.request_capture(host);
        if let Err(e) = &result {
            tracing::warn!("pointer capture failed: {e}");
            self.hint = match e {
                CaptureError::Unavailable => Hint::CaptureUnavailable,
                CaptureError::Rejected(_) => Hint::CaptureBlocked,
            };
        }
        result
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent, scene: &dyn SpatialQuery) -> Response {
        match event {
            InputEvent::Key { code, pressed } => {
                self.tracker.on_key_change(&code, pressed);
                Response::Nothing
            }
            InputEvent::LookDelta { dx, dy } => {
                self.tracker.on_look_delta(dx, dy);
                let look = self.tracker.look();
                self.pose.yaw = look.yaw;
                self.pose.pitch = look.pitch;
                Response::Nothing
            }
            InputEvent::PrimaryClick => self.click(scene),
            InputEvent::ClosePanel => {
                self.close_panel();
                Response::Nothing
            }
            InputEvent::Capture(signal) => {
                self.on_capture_signal(signal);
                Response::Nothing
            }
        }
    }

    /// Primary click. Picks only while captured; otherwise asks the host to
    /// capture the pointer.
    pub fn click(&mut self, scene: &dyn SpatialQuery) -> Response {
        if !self.tracker.is_locked() {
            return Response::RequestCapture;
        }
        match self.picker.pick(&self.pose, scene, &self.catalog) {
            Some(selection) => {
                let entry = selection.entry;
                tracing::info!(item = %entry.id, "showing item details");
                self.panel = Some(InfoPanel {
                    item: entry.id.clone(),
                    title: entry.name.clone(),
                    body: entry.info.clone(),
                });
                Response::Selected(entry.id.clone())
            }
            None => Response::Nothing,
        }
    }

    pub fn close_panel(&mut self) {
        if self.panel.take().is_some() {
            tracing::debug!("info panel closed");
        }
    }

    /// Losing capture also closes the info panel.
    pub fn on_capture_signal(&mut self, signal: CaptureSignal) {
        self.tracker.on_capture_signal(signal);
        match signal {
            CaptureSignal::Locked => {
                self.hint = Hint::Exploring;
                tracing::info!("pointer captured");
            }
            CaptureSignal::Unlocked => {
                self.panel = None;
                self.hint = Hint::Enter;
                tracing::info!("pointer released");
            }
            CaptureSignal::Error => {
                self.panel = None;
                self.hint = Hint::CaptureBlocked;
                tracing::warn!("pointer capture error");
            }
        }
    }

    /// Advance one frame. Does nothing while uncaptured.
    pub fn tick(&mut self, dt: f32) {
        if !self.tracker.is_locked() {
            return;
        }
        self.motion.step(self.tracker.intent(), &mut self.pose, dt);
    }
}

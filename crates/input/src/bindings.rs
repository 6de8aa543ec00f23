use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of controls the tracker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Sprint,
}

/// Maps platform key codes to controls.
///
/// Codes use the physical-key vocabulary shared by browsers and winit
/// (`"KeyW"`, `"ArrowUp"`, `"ShiftLeft"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: BTreeMap<String, Control>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (code, control) in [
            ("KeyW", Control::MoveForward),
            ("ArrowUp", Control::MoveForward),
            ("KeyS", Control::MoveBackward),
            ("ArrowDown", Control::MoveBackward),
            ("KeyA", Control::MoveLeft),
            ("ArrowLeft", Control::MoveLeft),
            ("KeyD", Control::MoveRight),
            ("ArrowRight", Control::MoveRight),
            ("ShiftLeft", Control::Sprint),
            ("ShiftRight", Control::Sprint),
        ] {
            bindings.bind(code, control);
        }
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Bind `code` to `control`, replacing any previous binding for that code.
    pub fn bind(&mut self, code: impl Into<String>, control: Control) {
        self.map.insert(code.into(), control);
    }

    pub fn control_for(&self, code: &str) -> Option<Control> {
        self.map.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

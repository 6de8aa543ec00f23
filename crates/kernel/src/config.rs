use crate::motion::MotionConfig;
use serde::{Deserialize, Serialize};
use showroom_common::CameraPose;
use showroom_input::{Control, DEFAULT_LOOK_SENSITIVITY, KeyBindings};
use showroom_picking::{Catalog, CatalogEntry, CatalogError};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors from loading or validating a showroom configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything tunable about a showroom session. Every field is optional in
/// the YAML file.
///
/// ```yaml
/// motion:
///   base_speed: 7.5
/// look_sensitivity: 0.0025
/// start:
///   position: [0.0, 1.7, 9.0]
///   yaw: 0.0
///   pitch: 0.0
/// pick_range: 15.0
/// bindings:
///   KeyZ: move_forward
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    pub motion: MotionConfig,
    /// Radians per mouse count.
    pub look_sensitivity: f32,
    pub start: CameraPose,
    /// Furthest distance a click can select; unlimited when absent.
    pub pick_range: Option<f32>,
    /// Extra key codes bound on top of the defaults.
    pub bindings: BTreeMap<String, Control>,
    /// Replaces the built-in catalog when present.
    pub catalog: Option<Vec<CatalogEntry>>,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            start: CameraPose::default(),
            pick_range: None,
            bindings: BTreeMap::new(),
            catalog: None,
        }
    }
}

impl ShowroomConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded showroom config");
        Ok(config)
    }

    /// Load `path` if given, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.motion;
        let finite = [
            m.damping,
            m.base_speed,
            m.sprint_boost,
            m.min_height,
            m.max_height,
            self.look_sensitivity,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::Invalid("values must be finite".into()));
        }
        if m.damping < 0.0 || m.base_speed < 0.0 || m.sprint_boost < 0.0 {
            return Err(ConfigError::Invalid(
                "damping, base_speed and sprint_boost must be non-negative".into(),
            ));
        }
        if m.min_height > m.max_height {
            return Err(ConfigError::Invalid(format!(
                "min_height {} exceeds max_height {}",
                m.min_height, m.max_height
            )));
        }
        if self.look_sensitivity <= 0.0 {
            return Err(ConfigError::Invalid("look_sensitivity must be positive".into()));
        }
        let start = &self.start;
        if !(start.position.is_finite() && start.yaw.is_finite() && start.pitch.is_finite()) {
            return Err(ConfigError::Invalid("start pose must be finite".into()));
        }
        if let Some(range) = self.pick_range {
            if range.is_nan() || range <= 0.0 {
                return Err(ConfigError::Invalid(format!("pick_range {range} must be positive")));
            }
        }
        Ok(())
    }

    /// Default bindings plus the configured extras.
    pub fn key_bindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::default();
        for (code, control) in &self.bindings {
            bindings.bind(code.as_str(), *control);
        }
        bindings
    }

    /// The catalog this config selects.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog {
            Some(entries) => Ok(Catalog::new(entries.clone())?),
            None => Ok(Catalog::showroom()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_yaml_gives_defaults() {
        let cfg = ShowroomConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, ShowroomConfig::default());
        assert_eq!(cfg.catalog().unwrap().len(), 7);
    }

    #[test]
    fn partial_motion_override() {
        let cfg = ShowroomConfig::from_yaml_str("motion:\n  base_speed: 7.5\n").unwrap();
        assert_eq!(cfg.motion.base_speed, 7.5);
        assert_eq!(cfg.motion.damping, 8.0);
    }

    #[test]
    fn inverted_height_band_rejected() {
        let err = ShowroomConfig::from_yaml_str("motion:\n  min_height: 3.0\n  max_height: 1.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_sensitivity_rejected() {
        let err = ShowroomConfig::from_yaml_str("look_sensitivity: 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_finite_start_rejected() {
        for yaml in [
            "start:\n  position: [0.0, .nan, 0.0]\n  yaw: 0.0\n  pitch: 0.0\n",
            "start:\n  position: [.inf, 1.7, 0.0]\n  yaw: 0.0\n  pitch: 0.0\n",
            "start:\n  position: [0.0, 1.7, 0.0]\n  yaw: .nan\n  pitch: 0.0\n",
            "start:\n  position: [0.0, 1.7, 0.0]\n  yaw: 0.0\n  pitch: -.inf\n",
        ] {
            let err = ShowroomConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{yaml}");
        }
    }

    #[test]
    fn pick_range_must_be_positive() {
        let cfg = ShowroomConfig::from_yaml_str("pick_range: 12.5\n").unwrap();
        assert_eq!(cfg.pick_range, Some(12.5));
        assert!(ShowroomConfig::from_yaml_str("pick_range: 0.0\n").is_err());
        assert!(ShowroomConfig::from_yaml_str("pick_range: .nan\n").is_err());
    }

    #[test]
    fn extra_bindings_layer_over_defaults() {
        let cfg =
            ShowroomConfig::from_yaml_str("bindings:\n  KeyZ: move_forward\n  KeyW: sprint\n").unwrap();
        let b = cfg.key_bindings();
        assert_eq!(b.control_for("KeyZ"), Some(Control::MoveForward));
        assert_eq!(b.control_for("KeyW"), Some(Control::Sprint));
        assert_eq!(b.control_for("ArrowUp"), Some(Control::MoveForward));
        assert!(ShowroomConfig::from_yaml_str("bindings:\n  KeyZ: jump\n").is_err());
    }

    #[test]
    fn catalog_override_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            "catalog:\n  - id: chair\n    name: Chair\n    info: A chair.\n    position: [1.0, 0.0, 2.0]\n    kind: display_piece\n    size: [0.2, 0.4]\n"
        )
        .unwrap();
        let cfg = ShowroomConfig::load(tmp.path()).unwrap();
        let catalog = cfg.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        let chair = catalog.iter().next().unwrap();
        assert_eq!(chair.id.as_str(), "chair");
        assert_eq!(chair.color, None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ShowroomConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = ShowroomConfig::from_yaml_str("motion: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}

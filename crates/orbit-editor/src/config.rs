//! Editor configuration
//!
//! Loaded from and saved to RON; every missing field falls back to its
//! default.

use std::path::{Path, PathBuf};

use orbit_core::{DEFAULT_TARGET_SIZE, FALLBACK_DENSITY, UNIT_SIZE};
use orbit_scene::SceneConfig;
use serde::{Deserialize, Serialize};

pub use orbit_scene::ConfigError;

/// Value change per pixel of horizontal pointer travel while scrubbing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    pub position: f32,
    pub rotation: f32,
    pub dimension: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            position: 0.02,
            rotation: 0.2,
            dimension: 0.01,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Edge length of one dimension count, in meters
    pub unit_size: f32,
    /// Scrub sensitivities
    pub drag: DragConfig,
    /// Largest distance between a click and a connector it may snap to
    pub connector_snap_distance: f32,
    /// Density for meshes without module metadata (kg/m^3)
    pub fallback_density: f32,
    /// Directory module paths are resolved against
    pub asset_root: PathBuf,
    /// Target size for module loads that name none
    pub default_target_size: f32,
    /// Where new primitives are anchored
    pub spawn_position: [f32; 3],
    /// Scene helpers, camera and highlight
    pub scene: SceneConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            unit_size: UNIT_SIZE,
            drag: DragConfig::default(),
            connector_snap_distance: 5.0,
            fallback_density: FALLBACK_DENSITY,
            asset_root: PathBuf::from("assets"),
            default_target_size: DEFAULT_TARGET_SIZE,
            spawn_position: [0.0, 1.0, 0.0],
            scene: SceneConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.unit_size, 2.0);
        assert_eq!(config.drag.position, 0.02);
        assert_eq!(config.drag.rotation, 0.2);
        assert_eq!(config.drag.dimension, 0.01);
        assert_eq!(config.fallback_density, 1000.0);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");

        let mut config = EditorConfig::default();
        config.unit_size = 1.5;
        config.asset_root = dir.path().to_path_buf();
        config.scene.highlight.color = 0x00ff00;
        config.save(&path).unwrap();

        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");
        std::fs::write(&path, "(unit_size: 3.0, drag: (rotation: 1.0))").unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.unit_size, 3.0);
        assert_eq!(config.drag.rotation, 1.0);
        assert_eq!(config.drag.position, 0.02);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EditorConfig::load("/nonexistent/editor.ron"),
            Err(ConfigError::Io(_))
        ));
    }
}

//! Scene configuration structures
//!
//! Settings for the helpers, camera and highlight style that can be
//! serialized to and loaded from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ground grid helper configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Whether the grid helper is added
    pub enabled: bool,
    /// Full edge length of the grid
    pub size: f32,
    /// Number of cells along each edge
    pub divisions: u32,
    /// Center line color (0xRRGGBB)
    pub center_color: u32,
    /// Cell line color (0xRRGGBB)
    pub line_color: u32,
    /// Length of the axes helper
    pub axes_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 50.0,
            divisions: 50,
            center_color: 0x888888,
            line_color: 0x444444,
            axes_size: 5.0,
        }
    }
}

/// Light setup configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light color (0xRRGGBB)
    pub ambient_color: u32,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Directional light color (0xRRGGBB)
    pub directional_color: u32,
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Directional light position
    pub directional_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0xffffff,
            ambient_intensity: 0.6,
            directional_color: 0xffffff,
            directional_intensity: 0.8,
            directional_position: [10.0, 20.0, 15.0],
        }
    }
}

/// Camera default configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial eye position
    pub position: [f32; 3],
    /// Initial look-at target
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            position: [10.0, 10.0, 10.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Tint applied to selected objects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HighlightConfig {
    /// Base color of a highlighted material (0xRRGGBB)
    pub color: u32,
    /// Emissive color of a highlighted material (0xRRGGBB)
    pub emissive: u32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: 0x93d3eb,
            emissive: 0x003300,
        }
    }
}

/// Complete scene configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SceneConfig {
    /// Grid and axes helpers
    #[serde(default)]
    pub grid: GridConfig,
    /// Lights
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Camera defaults
    #[serde(default)]
    pub camera: CameraConfig,
    /// Selection highlight
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl SceneConfig {
    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    /// Parse configuration from RON text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(String),
    /// Encoding to RON failed
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// The file is not valid RON for this structure
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ron");

        let mut config = SceneConfig::default();
        config.grid.divisions = 10;
        config.highlight.color = 0xff0000;
        config.save(&path).unwrap();

        let loaded = SceneConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = SceneConfig::from_ron("(grid: (divisions: 8))").unwrap();
        assert_eq!(config.grid.divisions, 8);
        assert_eq!(config.grid.size, GridConfig::default().size);
        assert_eq!(config.highlight, HighlightConfig::default());
    }

    #[test]
    fn test_invalid_ron() {
        assert!(matches!(
            SceneConfig::from_ron("(grid: 12"),
            Err(ConfigError::Deserialize(_))
        ));
    }
}

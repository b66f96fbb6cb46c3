//! Parametric shape kinds

use serde::{Deserialize, Serialize};

/// Shape of a parametric primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShapeKind {
    #[default]
    Box,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    /// Parse a shape name, falling back to `Box` for anything unrecognized
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sphere" => ShapeKind::Sphere,
            "cylinder" => ShapeKind::Cylinder,
            _ => ShapeKind::Box,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
        }
    }

    /// Whether the anchor is the lowest corner (box) or the base center
    pub fn anchors_at_corner(&self) -> bool {
        matches!(self, ShapeKind::Box)
    }

    /// All shape kinds for UI
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Box, ShapeKind::Sphere, ShapeKind::Cylinder]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known() {
        assert_eq!(ShapeKind::parse("sphere"), ShapeKind::Sphere);
        assert_eq!(ShapeKind::parse("Cylinder"), ShapeKind::Cylinder);
        assert_eq!(ShapeKind::parse("cube"), ShapeKind::Box);
    }

    #[test]
    fn test_parse_falls_back_to_box() {
        assert_eq!(ShapeKind::parse("torus"), ShapeKind::Box);
        assert_eq!(ShapeKind::parse(""), ShapeKind::Box);
    }
}

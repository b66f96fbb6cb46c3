//! Surface materials.
//!
//! Materials are immutable once built and shared behind `Arc`; changing the
//! look of a mesh means swapping its `Arc<Material>` for a new one. That
//! keeps the identity of a stored material observable with `Arc::ptr_eq`.

use orbit_core::{Color, PARAMETRIC_METALNESS, PARAMETRIC_ROUGHNESS};

use crate::config::HighlightConfig;

/// Physically based surface description.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Self-illumination color.
    pub emissive: Color,
    /// Metalness in `0.0..=1.0`.
    pub metalness: f32,
    /// Roughness in `0.0..=1.0`.
    pub roughness: f32,
}

impl Material {
    /// Plain material with no emission.
    pub fn new(color: Color, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            emissive: Color::BLACK,
            metalness,
            roughness,
        }
    }

    /// Material used for freshly built parametric meshes.
    pub fn parametric(color: Color) -> Self {
        Self::new(color, PARAMETRIC_METALNESS, PARAMETRIC_ROUGHNESS)
    }

    /// Copy of this material with a different base color.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Copy of this material tinted with the selection highlight.
    pub fn highlighted(&self, style: &HighlightConfig) -> Self {
        Self {
            color: Color::from_hex(style.color),
            emissive: Color::from_hex(style.emissive),
            ..self.clone()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::WHITE, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_surface() {
        let base = Material::parametric(Color::from_hex(0xc7c7c7));
        let lit = base.highlighted(&HighlightConfig::default());
        assert_eq!(lit.color.to_hex(), 0x93d3eb);
        assert_eq!(lit.emissive.to_hex(), 0x003300);
        assert_eq!(lit.metalness, base.metalness);
        assert_eq!(lit.roughness, base.roughness);
        // the source is untouched
        assert_eq!(base.color.to_hex(), 0xc7c7c7);
    }

    #[test]
    fn test_with_color() {
        let m = Material::parametric(Color::WHITE).with_color(Color::BLACK);
        assert_eq!(m.color, Color::BLACK);
        assert_eq!(m.metalness, PARAMETRIC_METALNESS);
    }
}

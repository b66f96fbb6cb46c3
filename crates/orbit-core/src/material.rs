//! Structural materials and their densities

use serde::{Deserialize, Serialize};

/// Material a parametric object is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MaterialKind {
    #[default]
    Aluminum,
    Steel,
    Titanium,
    Composite,
    Plastic,
}

/// Density for common materials (kg/m^3)
pub mod density {
    pub const ALUMINUM: f32 = 2700.0;
    pub const STEEL: f32 = 7850.0;
    pub const TITANIUM: f32 = 4500.0;
    pub const COMPOSITE: f32 = 1600.0;
    pub const PLASTIC: f32 = 950.0;
}

impl MaterialKind {
    /// Density in kg/m^3
    pub fn density(&self) -> f32 {
        match self {
            MaterialKind::Aluminum => density::ALUMINUM,
            MaterialKind::Steel => density::STEEL,
            MaterialKind::Titanium => density::TITANIUM,
            MaterialKind::Composite => density::COMPOSITE,
            MaterialKind::Plastic => density::PLASTIC,
        }
    }

    /// Lower-case identifier, as used by the material selector
    pub fn name(&self) -> &'static str {
        match self {
            MaterialKind::Aluminum => "aluminum",
            MaterialKind::Steel => "steel",
            MaterialKind::Titanium => "titanium",
            MaterialKind::Composite => "composite",
            MaterialKind::Plastic => "plastic",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKind::Aluminum => "Aluminum",
            MaterialKind::Steel => "Steel",
            MaterialKind::Titanium => "Titanium",
            MaterialKind::Composite => "Composite",
            MaterialKind::Plastic => "Plastic",
        }
    }

    /// Parse a selector identifier
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// All materials for UI
    pub fn all() -> &'static [MaterialKind] {
        &[
            MaterialKind::Aluminum,
            MaterialKind::Steel,
            MaterialKind::Titanium,
            MaterialKind::Composite,
            MaterialKind::Plastic,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_densities() {
        assert_eq!(MaterialKind::Aluminum.density(), 2700.0);
        assert_eq!(MaterialKind::Steel.density(), 7850.0);
        assert_eq!(MaterialKind::Plastic.density(), 950.0);
    }

    #[test]
    fn test_parse_round_trip() {
        for m in MaterialKind::all() {
            assert_eq!(MaterialKind::parse(m.name()), Some(*m));
        }
        assert_eq!(MaterialKind::parse("STEEL"), Some(MaterialKind::Steel));
        assert_eq!(MaterialKind::parse("unobtainium"), None);
    }
}

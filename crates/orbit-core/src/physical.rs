//! Derived physical properties

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::MaterialKind;

/// Static physical properties derived from an object's shape and material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProperties {
    /// Volume in m^3
    pub volume: f32,
    /// Surface area in m^2
    pub surface_area: f32,
    /// Mass in kg
    pub mass: f32,
    /// Axis-aligned extent in meters
    pub bounding_box: Vec3,
    pub center_of_mass: Vec3,
    /// Scalar moment of inertia (box formula about X); only parametric
    /// objects report one
    pub moment_of_inertia: Option<f32>,
    /// Material label; generic estimates carry none
    pub material: Option<MaterialKind>,
}

impl PhysicalProperties {
    /// All-zero properties, reported for a missing object
    pub fn zeroed() -> Self {
        Self {
            volume: 0.0,
            surface_area: 0.0,
            mass: 0.0,
            bounding_box: Vec3::ZERO,
            center_of_mass: Vec3::ZERO,
            moment_of_inertia: None,
            material: None,
        }
    }

    /// Estimate properties by treating the extent as a solid box
    pub fn from_extent(
        extent: Vec3,
        center: Vec3,
        density: f32,
        material: Option<MaterialKind>,
    ) -> Self {
        let volume = extent.x * extent.y * extent.z;
        Self {
            volume,
            surface_area: box_surface_area(extent),
            mass: volume * density,
            bounding_box: extent,
            center_of_mass: center,
            moment_of_inertia: None,
            material,
        }
    }

    /// Bounding box formatted as `X×Y×Z` with two decimals
    pub fn bounding_box_label(&self) -> String {
        format!(
            "{:.2}×{:.2}×{:.2}",
            self.bounding_box.x, self.bounding_box.y, self.bounding_box.z
        )
    }
}

impl Default for PhysicalProperties {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Surface area of a rectangular box
pub fn box_surface_area(extent: Vec3) -> f32 {
    2.0 * (extent.x * extent.y + extent.x * extent.z + extent.y * extent.z)
}

//! Inertia tensor calculations

use serde::{Deserialize, Serialize};

/// Inertia tensor (symmetric 3x3 matrix)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct InertiaMatrix {
    pub ixx: f32,
    pub ixy: f32,
    pub ixz: f32,
    pub iyy: f32,
    pub iyz: f32,
    pub izz: f32,
}

impl InertiaMatrix {
    /// Create an inertia matrix for a solid box with extents along X, Y and Z
    pub fn box_inertia(mass: f32, size_x: f32, size_y: f32, size_z: f32) -> Self {
        let x2 = size_x * size_x;
        let y2 = size_y * size_y;
        let z2 = size_z * size_z;
        let k = mass / 12.0;
        Self {
            ixx: k * (y2 + z2),
            ixy: 0.0,
            ixz: 0.0,
            iyy: k * (x2 + z2),
            iyz: 0.0,
            izz: k * (x2 + y2),
        }
    }

    /// Calculate approximate inertia from a bounding box extent
    pub fn from_extent(mass: f32, extent: [f32; 3]) -> Self {
        Self::box_inertia(mass, extent[0], extent[1], extent[2])
    }

    /// Get as array [ixx, ixy, ixz, iyy, iyz, izz]
    pub fn to_array(&self) -> [f32; 6] {
        [self.ixx, self.ixy, self.ixz, self.iyy, self.iyz, self.izz]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_inertia_diagonal() {
        let i = InertiaMatrix::box_inertia(12.0, 1.0, 2.0, 3.0);
        assert_relative_eq!(i.ixx, 13.0, epsilon = 1e-5);
        assert_relative_eq!(i.iyy, 10.0, epsilon = 1e-5);
        assert_relative_eq!(i.izz, 5.0, epsilon = 1e-5);
        assert_eq!(i.ixy, 0.0);
    }
}

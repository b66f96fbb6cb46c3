//! Dimension counts of parametric objects

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DIMENSION_MAX, DIMENSION_MIN};

/// Unit-less module counts along each axis, always within
/// `DIMENSION_MIN..=DIMENSION_MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { x: 1, y: 1, z: 1 }
    }
}

impl Dimensions {
    /// Build dimensions, clamping every axis into the allowed range
    pub fn clamped(x: i64, y: i64, z: i64) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
            z: clamp_axis(z),
        }
    }

    /// Metric size for the given unit length
    pub fn size(&self, unit_size: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * unit_size,
            self.y as f32 * unit_size,
            self.z as f32 * unit_size,
        )
    }

    pub fn to_array(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i64; 3]> for Dimensions {
    fn from(values: [i64; 3]) -> Self {
        Self::clamped(values[0], values[1], values[2])
    }
}

/// Clamp a single axis count into `DIMENSION_MIN..=DIMENSION_MAX`
pub fn clamp_axis(value: i64) -> u32 {
    value.clamp(DIMENSION_MIN as i64, DIMENSION_MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_out_of_range() {
        let dims = Dimensions::clamped(0, 150, -5);
        assert_eq!(dims, Dimensions { x: 1, y: 100, z: 1 });
    }

    #[test]
    fn test_in_range_untouched() {
        let dims = Dimensions::from([3, 2, 1]);
        assert_eq!(dims.to_array(), [3, 2, 1]);
    }

    #[test]
    fn test_size_scales_by_unit() {
        let size = Dimensions::clamped(3, 2, 1).size(2.0);
        assert_eq!(size, Vec3::new(6.0, 4.0, 2.0));
    }
}

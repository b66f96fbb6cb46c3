//! Parametric shape state and its closed-form physical properties

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::{PARAMETRIC_COLOR, UNIT_SIZE};
use crate::dimensions::Dimensions;
use crate::inertia::InertiaMatrix;
use crate::material::MaterialKind;
use crate::physical::{PhysicalProperties, box_surface_area};
use crate::primitive::{MeshData, generate_box_mesh, generate_cylinder_mesh, generate_sphere_mesh};
use crate::shape::ShapeKind;

/// Everything that determines a parametric primitive's geometry and mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParametricShape {
    pub kind: ShapeKind,
    pub dimensions: Dimensions,
    pub material: MaterialKind,
    /// Box: lowest corner. Sphere and cylinder: base center.
    pub anchor: Vec3,
    /// Meters per dimension count
    pub unit_size: f32,
}

impl Default for ParametricShape {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Box,
            dimensions: Dimensions::default(),
            material: MaterialKind::default(),
            anchor: Vec3::ZERO,
            unit_size: UNIT_SIZE,
        }
    }
}

impl ParametricShape {
    pub fn new(kind: ShapeKind, anchor: Vec3) -> Self {
        Self {
            kind,
            anchor,
            ..Self::default()
        }
    }

    /// Metric size of the dimension counts
    pub fn size(&self) -> Vec3 {
        self.dimensions.size(self.unit_size)
    }

    /// Radius used by the sphere and cylinder builders
    pub fn radius(&self) -> f32 {
        let size = self.size();
        match self.kind {
            ShapeKind::Sphere => size.max_element() / 2.0,
            ShapeKind::Cylinder => size.x.max(size.z) / 2.0,
            ShapeKind::Box => 0.0,
        }
    }

    /// Axis-aligned extent of the generated geometry
    pub fn bounding_box(&self) -> Vec3 {
        let size = self.size();
        match self.kind {
            ShapeKind::Box => size,
            ShapeKind::Sphere => Vec3::splat(self.radius() * 2.0),
            ShapeKind::Cylinder => {
                let d = self.radius() * 2.0;
                Vec3::new(d, size.y, d)
            }
        }
    }

    /// World position of the mesh center
    ///
    /// Box meshes sit with their lowest corner on the anchor; spheres and
    /// cylinders are only lifted by half their Y size.
    pub fn mesh_center(&self) -> Vec3 {
        let size = self.size();
        if self.kind.anchors_at_corner() {
            self.anchor + size / 2.0
        } else {
            self.anchor + Vec3::new(0.0, size.y / 2.0, 0.0)
        }
    }

    /// Surface color; every shape shares one palette entry and material
    /// never changes it
    pub fn color(&self) -> Color {
        Color::from_hex(PARAMETRIC_COLOR)
    }

    /// Triangle mesh centered on the local origin
    pub fn geometry(&self) -> MeshData {
        let size = self.size();
        match self.kind {
            ShapeKind::Box => generate_box_mesh(size.to_array()),
            ShapeKind::Sphere => generate_sphere_mesh(self.radius()),
            ShapeKind::Cylinder => generate_cylinder_mesh(self.radius(), size.y),
        }
    }

    /// Closed-form volume, surface, mass and inertia
    ///
    /// The moment of inertia always uses the solid box formula over the
    /// bounding box, whatever the shape.
    pub fn physical_properties(&self) -> PhysicalProperties {
        let size = self.size();
        let (volume, surface_area) = match self.kind {
            ShapeKind::Box => (size.x * size.y * size.z, box_surface_area(size)),
            ShapeKind::Sphere => {
                let r = self.radius();
                ((4.0 / 3.0) * PI * r.powi(3), 4.0 * PI * r.powi(2))
            }
            ShapeKind::Cylinder => {
                let r = self.radius();
                let h = size.y;
                (PI * r.powi(2) * h, 2.0 * PI * r * (r + h))
            }
        };
        let bounding_box = self.bounding_box();
        let mass = volume * self.material.density();
        let inertia = InertiaMatrix::from_extent(mass, bounding_box.to_array());

        PhysicalProperties {
            volume,
            surface_area,
            mass,
            bounding_box,
            center_of_mass: self.anchor + bounding_box / 2.0,
            moment_of_inertia: Some(inertia.ixx),
            material: Some(self.material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shape(kind: ShapeKind, dims: [i64; 3]) -> ParametricShape {
        ParametricShape {
            dimensions: Dimensions::from(dims),
            ..ParametricShape::new(kind, Vec3::ZERO)
        }
    }

    #[test]
    fn test_box_volume_and_mass() {
        let s = shape(ShapeKind::Box, [3, 2, 1]);
        let p = s.physical_properties();
        assert_relative_eq!(p.volume, 48.0, max_relative = 1e-3);
        assert_relative_eq!(p.mass, 48.0 * 2700.0, max_relative = 1e-3);
        assert_relative_eq!(
            p.surface_area,
            2.0 * (24.0 + 12.0 + 8.0),
            max_relative = 1e-3
        );
        assert_eq!(p.bounding_box, Vec3::new(6.0, 4.0, 2.0));
        assert_eq!(p.material, Some(MaterialKind::Aluminum));
    }

    #[test]
    fn test_sphere_uses_largest_axis() {
        let s = shape(ShapeKind::Sphere, [1, 4, 2]);
        let r = 4.0;
        let p = s.physical_properties();
        assert_relative_eq!(p.volume, 4.0 / 3.0 * PI * r * r * r, max_relative = 1e-3);
        assert_relative_eq!(p.surface_area, 4.0 * PI * r * r, max_relative = 1e-3);
        assert_eq!(p.bounding_box, Vec3::splat(8.0));
    }

    #[test]
    fn test_cylinder_radius_ignores_height() {
        let s = shape(ShapeKind::Cylinder, [2, 5, 3]);
        let (r, h) = (3.0, 10.0);
        let p = s.physical_properties();
        assert_relative_eq!(p.volume, PI * r * r * h, max_relative = 1e-3);
        assert_relative_eq!(p.surface_area, 2.0 * PI * r * (r + h), max_relative = 1e-3);
        assert_eq!(p.bounding_box, Vec3::new(6.0, 10.0, 6.0));
    }

    #[test]
    fn test_volume_matches_formula_across_range() {
        for kind in ShapeKind::all() {
            for dims in [[1, 1, 1], [100, 100, 100], [7, 1, 50], [1, 99, 2]] {
                let s = shape(*kind, dims);
                let size = s.size();
                let expected = match kind {
                    ShapeKind::Box => size.x * size.y * size.z,
                    ShapeKind::Sphere => {
                        let r = size.max_element() / 2.0;
                        4.0 / 3.0 * PI * r.powi(3)
                    }
                    ShapeKind::Cylinder => {
                        let r = size.x.max(size.z) / 2.0;
                        PI * r * r * size.y
                    }
                };
                assert_relative_eq!(s.physical_properties().volume, expected, max_relative = 1e-3);
            }
        }
    }

    #[test]
    fn test_inertia_uses_box_formula_for_every_shape() {
        for kind in ShapeKind::all() {
            let s = shape(*kind, [2, 3, 4]);
            let p = s.physical_properties();
            let b = p.bounding_box;
            let expected = p.mass / 12.0 * (b.y * b.y + b.z * b.z);
            assert_relative_eq!(p.moment_of_inertia.unwrap(), expected, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_center_of_mass_offsets_anchor() {
        let mut s = shape(ShapeKind::Sphere, [2, 2, 2]);
        s.anchor = Vec3::new(1.0, 0.0, -1.0);
        let p = s.physical_properties();
        assert_eq!(p.center_of_mass, Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_mesh_center_anchor_rule() {
        let mut b = shape(ShapeKind::Box, [3, 2, 1]);
        b.anchor = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(b.mesh_center(), Vec3::new(4.0, 3.0, 2.0));

        let mut c = shape(ShapeKind::Cylinder, [3, 2, 1]);
        c.anchor = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(c.mesh_center(), Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_color_is_shape_based() {
        let mut s = shape(ShapeKind::Box, [1, 1, 1]);
        let before = s.color();
        s.material = MaterialKind::Steel;
        assert_eq!(s.color(), before);
        assert_eq!(before.to_hex(), 0xc7c7c7);
    }
}

//! Sphere mesh generation (UV sphere)

use std::f32::consts::PI;

use super::MeshData;
use crate::constants::{SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS};

/// Generate a UV sphere mesh with poles on the Y axis
pub fn generate_sphere_mesh(radius: f32) -> MeshData {
    generate_sphere_mesh_with_segments(radius, SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS)
}

/// Generate a UV sphere mesh with custom resolution
pub fn generate_sphere_mesh_with_segments(
    radius: f32,
    lat_segments: u32,
    lon_segments: u32,
) -> MeshData {
    let lat_segments = lat_segments.max(2);
    let lon_segments = lon_segments.max(3);
    let mut mesh = MeshData::default();

    for lat in 0..=lat_segments {
        let theta = (lat as f32 / lat_segments as f32) * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=lon_segments {
            let phi = (lon as f32 / lon_segments as f32) * 2.0 * PI;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let n = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            mesh.vertices.push([radius * n[0], radius * n[1], radius * n[2]]);
            mesh.normals.push(n);
        }
    }

    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let current = lat * (lon_segments + 1) + lon;
            let next = current + lon_segments + 1;
            mesh.indices
                .extend_from_slice(&[current, current + 1, next, current + 1, next + 1, next]);
        }
    }

    mesh
}

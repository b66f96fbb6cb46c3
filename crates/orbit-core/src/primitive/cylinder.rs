//! Cylinder mesh generation (Y axis, with end caps)

use std::f32::consts::PI;

use super::MeshData;
use crate::constants::CYLINDER_SEGMENTS;

/// Generate a cylinder standing on the Y axis, centered on the origin
pub fn generate_cylinder_mesh(radius: f32, height: f32) -> MeshData {
    generate_cylinder_mesh_with_segments(radius, height, CYLINDER_SEGMENTS)
}

/// Generate a cylinder mesh with custom segment count
pub fn generate_cylinder_mesh_with_segments(radius: f32, height: f32, segments: u32) -> MeshData {
    let half = height / 2.0;
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    let ring = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        (theta.cos(), theta.sin())
    };

    // Side: bottom/top vertex pairs sharing the radial normal
    for i in 0..=segments {
        let (c, s) = ring(i);
        mesh.vertices.push([radius * c, -half, radius * s]);
        mesh.normals.push([c, 0.0, s]);
        mesh.vertices.push([radius * c, half, radius * s]);
        mesh.normals.push([c, 0.0, s]);
    }
    for i in 0..segments {
        let base = i * 2;
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    // Caps
    for (y, ny) in [(half, 1.0f32), (-half, -1.0f32)] {
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push([0.0, y, 0.0]);
        mesh.normals.push([0.0, ny, 0.0]);

        let rim = mesh.vertices.len() as u32;
        for i in 0..=segments {
            let (c, s) = ring(i);
            mesh.vertices.push([radius * c, y, radius * s]);
            mesh.normals.push([0.0, ny, 0.0]);
        }
        for i in 0..segments {
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[center, rim + i + 1, rim + i]);
            } else {
                mesh.indices.extend_from_slice(&[center, rim + i, rim + i + 1]);
            }
        }
    }

    mesh
}

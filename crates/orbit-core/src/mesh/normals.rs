//! Normal calculation utilities for mesh data

use glam::Vec3;

/// Calculate normal for a single triangle
pub fn calculate_triangle_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let (a, b, c) = (Vec3::from(v0), Vec3::from(v1), Vec3::from(v2));
    let n = (b - a).cross(c - a);
    if n.length_squared() > 0.0 {
        n.normalize().to_array()
    } else {
        [0.0, 1.0, 0.0]
    }
}

/// Per-vertex normals averaged over the adjacent faces
///
/// Out-of-range indices are skipped.
pub fn calculate_vertex_normals(vertices: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(v0), Some(v1), Some(v2)) = (vertices.get(i0), vertices.get(i1), vertices.get(i2))
        else {
            continue;
        };
        let n = Vec3::from(calculate_triangle_normal(*v0, *v1, *v2));
        acc[i0] += n;
        acc[i1] += n;
        acc[i2] += n;
    }

    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

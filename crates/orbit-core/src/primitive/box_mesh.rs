//! Box (rectangular prism) mesh generation

use super::MeshData;

/// Generate a box mesh centered on the origin
///
/// `size` is [width (x), height (y), depth (z)]. Each face gets its own four
/// vertices so normals stay flat.
pub fn generate_box_mesh(size: [f32; 3]) -> MeshData {
    let [hx, hy, hz] = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24),
        normals: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    let mut add_face = |corners: [[f32; 3]; 4], normal: [f32; 3]| {
        let base = mesh.vertices.len() as u32;
        for corner in corners {
            mesh.vertices.push(corner);
            mesh.normals.push(normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    };

    // +X / -X
    add_face(
        [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        [1.0, 0.0, 0.0],
    );
    add_face(
        [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]],
        [-1.0, 0.0, 0.0],
    );

    // +Y (top) / -Y (bottom)
    add_face(
        [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        [0.0, 1.0, 0.0],
    );
    add_face(
        [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]],
        [0.0, -1.0, 0.0],
    );

    // +Z / -Z
    add_face(
        [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        [0.0, 0.0, 1.0],
    );
    add_face(
        [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]],
        [0.0, 0.0, -1.0],
    );

    mesh
}

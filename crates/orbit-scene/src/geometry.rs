//! Shared triangle geometry.

use orbit_core::MeshData;

use crate::bounds::BoundingBox;

/// Triangle mesh with its local bounds precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    mesh: MeshData,
    bounds: BoundingBox,
}

impl Geometry {
    /// Wraps mesh data and computes its bounds.
    pub fn new(mesh: MeshData) -> Self {
        let bounds = BoundingBox::from_vertices(&mesh.vertices);
        Self { mesh, bounds }
    }

    /// The underlying mesh data.
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Local-space bounds; invalid for an empty mesh.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

impl From<MeshData> for Geometry {
    fn from(mesh: MeshData) -> Self {
        Self::new(mesh)
    }
}

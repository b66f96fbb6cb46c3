//! Parametric objects and their live mesh

use std::sync::Arc;

use glam::Vec3;
use orbit_core::{Dimensions, MaterialKind, ParametricShape, PhysicalProperties, ShapeKind};
use orbit_scene::{Geometry, Material, Node, NodeId, NodeTag, ObjectId, Scene, Transform};
use tracing::debug;

/// One procedurally shaped object and the single mesh node that shows it
#[derive(Debug, Clone)]
pub struct ParametricObject {
    id: ObjectId,
    shape: ParametricShape,
    mesh: Option<NodeId>,
}

impl ParametricObject {
    /// Create an object without a mesh; call [`Self::create_base_module`]
    /// to build it.
    pub fn new(id: ObjectId, unit_size: f32) -> Self {
        Self {
            id,
            shape: ParametricShape {
                unit_size,
                ..ParametricShape::default()
            },
            mesh: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn shape(&self) -> &ParametricShape {
        &self.shape
    }

    pub fn dimensions(&self) -> Dimensions {
        self.shape.dimensions
    }

    pub fn material(&self) -> MaterialKind {
        self.shape.material
    }

    /// Current mesh node, `None` before the first build and after
    /// [`Self::clear`]
    pub fn mesh(&self) -> Option<NodeId> {
        self.mesh
    }

    /// Set anchor and shape, then build the first mesh
    pub fn create_base_module(
        &mut self,
        scene: &mut Scene,
        position: Vec3,
        kind: ShapeKind,
    ) -> NodeId {
        self.shape.anchor = position;
        self.shape.kind = kind;
        self.rebuild(scene)
    }

    /// Clamp the counts into range and rebuild
    pub fn update_dimensions(&mut self, scene: &mut Scene, dims: [i64; 3]) -> NodeId {
        self.shape.dimensions = Dimensions::from(dims);
        debug!(
            "Dimensions of {} set to {:?}",
            self.id,
            self.shape.dimensions.to_array()
        );
        self.rebuild(scene)
    }

    /// Change the material kind and recolor the live mesh.
    ///
    /// Geometry is untouched; only mass-related properties change.
    pub fn set_material(&mut self, scene: &mut Scene, kind: MaterialKind) {
        self.shape.material = kind;
        let color = self.shape.color();
        if let Some(node) = self.mesh.and_then(|id| scene.get_mut(id)) {
            if let Some(current) = node.material().cloned() {
                node.set_material(Arc::new(current.with_color(color)));
            }
        }
    }

    /// Move the anchor and rebuild
    pub fn set_position(&mut self, scene: &mut Scene, position: Vec3) -> NodeId {
        self.shape.anchor = position;
        self.rebuild(scene)
    }

    /// Shift the anchor and the live mesh by `delta` without rebuilding,
    /// keeping any rotation or scale applied to the mesh.
    pub fn translate(&mut self, scene: &mut Scene, delta: Vec3) {
        self.shape.anchor += delta;
        if let Some(node) = self.mesh.and_then(|id| scene.get_mut(id)) {
            node.transform.position += delta;
        }
    }

    pub fn physical_properties(&self) -> PhysicalProperties {
        self.shape.physical_properties()
    }

    /// Replace the mesh node wholesale.
    ///
    /// The new node is fully built before the old one is removed, so the
    /// scene never holds zero or two meshes for this object. Transform edits
    /// made directly on the old node are not carried over.
    pub fn rebuild(&mut self, scene: &mut Scene) -> NodeId {
        let node = Node::mesh(
            format!("{} {}", self.shape.kind.display_name(), self.id),
            Arc::new(Geometry::new(self.shape.geometry())),
            Arc::new(Material::parametric(self.shape.color())),
        )
        .with_transform(Transform::from_position(self.shape.mesh_center()))
        .with_tag(NodeTag::Parametric(self.id));

        if let Some(old) = self.mesh.take() {
            scene.remove(old);
        }
        let id = scene.add(node);
        self.mesh = Some(id);
        id
    }

    /// Remove the mesh from the scene and forget it
    pub fn clear(&mut self, scene: &mut Scene) {
        if let Some(old) = self.mesh.take() {
            scene.remove(old);
        }
    }
}

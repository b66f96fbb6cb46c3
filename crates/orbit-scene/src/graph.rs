//! Scene graph arena.
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeId`]. A node
//! is part of the visible scene when its parent chain reaches the root.

use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};
use orbit_core::{Color, PhysicalProperties};
use slotmap::{SlotMap, new_key_type};
use tracing::debug;
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::config::SceneConfig;
use crate::geometry::Geometry;
use crate::material::Material;

new_key_type! {
    /// Handle of a node in the scene arena.
    pub struct NodeId;
}

/// Identifier of a parametric object in the registry.
pub type ObjectId = Uuid;

/// Local placement of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity rotation and scale at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Rotation as a quaternion.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// Light sources added by the scene setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient {
        /// Light color.
        color: Color,
        /// Intensity multiplier.
        intensity: f32,
    },
    /// Parallel light shining from the node position toward the origin.
    Directional {
        /// Light color.
        color: Color,
        /// Intensity multiplier.
        intensity: f32,
    },
}

/// Renderable triangle mesh with a shared geometry and material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNode {
    /// Shared geometry.
    pub geometry: Arc<Geometry>,
    /// Current surface material.
    pub material: Arc<Material>,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node.
    Group,
    /// Triangle mesh.
    Mesh(MeshNode),
    /// Ground grid helper.
    Grid {
        /// Full edge length.
        size: f32,
        /// Cells per edge.
        divisions: u32,
    },
    /// Axes helper.
    Axes {
        /// Axis length.
        size: f32,
    },
    /// Light source.
    Light(LightKind),
}

/// Metadata stored on the root of a loaded station module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInstance {
    /// Module name from the catalog (e.g. `A1LightBlock`).
    pub module_name: String,
    /// Unique id of this placed instance.
    pub instance_id: Uuid,
    /// Uniform scale applied at load time.
    pub original_scale: Vec3,
    /// Physical properties computed at load time.
    pub properties: PhysicalProperties,
}

/// Back-reference from a node to the object that owns it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeTag {
    /// Helpers, lights and untracked nodes.
    #[default]
    None,
    /// Mesh of a parametric object.
    Parametric(ObjectId),
    /// Root of a loaded station module.
    Module(ModuleInstance),
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Display name.
    pub name: String,
    /// What the node is.
    pub kind: NodeKind,
    /// Placement relative to the parent.
    pub transform: Transform,
    /// Whether the node is drawn and pickable.
    pub visible: bool,
    /// Marks the node as a selection unit: picks on descendants resolve here.
    pub merged: bool,
    /// Owning object, if any.
    pub tag: NodeTag,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Creates a detached node.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
            visible: true,
            merged: false,
            tag: NodeTag::None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an empty group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// Creates a mesh node.
    pub fn mesh(name: impl Into<String>, geometry: Arc<Geometry>, material: Arc<Material>) -> Self {
        Self::new(name, NodeKind::Mesh(MeshNode { geometry, material }))
    }

    /// Sets the local transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the owner tag.
    pub fn with_tag(mut self, tag: NodeTag) -> Self {
        self.tag = tag;
        self
    }

    /// Sets the selection-unit marker.
    pub fn with_merged(mut self, merged: bool) -> Self {
        self.merged = merged;
        self
    }

    /// Parent node, `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Mesh payload if this is a mesh node.
    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Current material if this is a mesh node.
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.as_mesh().map(|m| &m.material)
    }

    /// Swaps the material of a mesh node, returning the previous one.
    pub fn set_material(&mut self, material: Arc<Material>) -> Option<Arc<Material>> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(std::mem::replace(&mut mesh.material, material)),
            _ => None,
        }
    }

    /// Grid, axes and lights.
    pub fn is_helper(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Grid { .. } | NodeKind::Axes { .. } | NodeKind::Light(_)
        )
    }

    /// Module metadata if this node is a module root.
    pub fn module(&self) -> Option<&ModuleInstance> {
        match &self.tag {
            NodeTag::Module(instance) => Some(instance),
            _ => None,
        }
    }
}

/// The scene graph.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    helpers: Vec<NodeId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene holding only the root group.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("Scene"));
        Self {
            nodes,
            root,
            helpers: Vec::new(),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a node under the root.
    pub fn add(&mut self, node: Node) -> NodeId {
        let root = self.root;
        self.insert_under(root, node)
    }

    /// Adds a node under `parent`; `None` when the parent does not exist.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        self.nodes
            .contains_key(parent)
            .then(|| self.insert_under(parent, node))
    }

    pub(crate) fn insert_under(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Deletes a node and its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        self.detach(id);
        let subtree = self.traverse(id);
        for node in &subtree {
            self.nodes.remove(*node);
        }
        self.helpers.retain(|h| !subtree.contains(h));
        debug!("Removed {} node(s) from scene", subtree.len());
        true
    }

    /// Unlinks a node from its parent, keeping it (and its subtree) in the
    /// arena.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get_mut(id).and_then(|n| n.parent.take()) else {
            return false;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        true
    }

    /// Moves `child` under `parent`. Refuses moves that would create a cycle.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(parent)
            || !self.nodes.contains_key(child)
            || child == self.root
            || self.ancestors(parent).contains(&child)
            || parent == child
        {
            return false;
        }
        self.detach(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        true
    }

    /// Gets a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Gets a node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the node exists in the arena.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether the node's parent chain reaches the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }
        id == self.root || self.ancestors(id).last() == Some(&self.root)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Direct children of a node; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Parent chain from the direct parent up to the topmost ancestor.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            chain.push(p);
            current = self.parent(p);
        }
        chain
    }

    /// Every node of the subtree below `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut all = self.traverse(id);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    /// Depth-first pre-order walk of the subtree rooted at `id`.
    pub fn traverse(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(id) {
            return order;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        order
    }

    /// Local-to-world matrix of a node.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = self
            .nodes
            .get(id)
            .map(|n| n.transform.matrix())
            .unwrap_or(Mat4::IDENTITY);
        for ancestor in self.ancestors(id) {
            if let Some(node) = self.nodes.get(ancestor) {
                matrix = node.transform.matrix() * matrix;
            }
        }
        matrix
    }

    /// World-space bounds of every mesh in the subtree rooted at `id`.
    pub fn world_bounds(&self, id: NodeId) -> Option<BoundingBox> {
        let bounds = self
            .traverse(id)
            .into_iter()
            .filter_map(|n| {
                let mesh = self.nodes.get(n)?.as_mesh()?;
                Some(mesh.geometry.bounds().transform(&self.world_matrix(n)))
            })
            .filter(BoundingBox::is_valid)
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b));
        bounds.is_valid().then_some(bounds)
    }

    /// Mesh nodes reachable from the root, in traversal order.
    pub fn mesh_nodes(&self) -> Vec<NodeId> {
        self.traverse(self.root)
            .into_iter()
            .filter(|id| self.nodes.get(*id).is_some_and(|n| n.as_mesh().is_some()))
            .collect()
    }

    /// Removes everything except the root and the helpers.
    pub fn clear(&mut self) {
        let doomed: Vec<NodeId> = self
            .children(self.root)
            .iter()
            .copied()
            .filter(|c| !self.helpers.contains(c))
            .collect();
        for id in doomed {
            self.remove(id);
        }
        // Detached leftovers
        let root = self.root;
        let orphans: Vec<NodeId> = self
            .nodes
            .keys()
            .filter(|id| *id != root && self.parent(*id).is_none())
            .collect();
        for id in orphans {
            self.remove(id);
        }
    }

    /// Adds the grid, axes and lights described by the configuration.
    ///
    /// Calling it again replaces the previous helpers.
    pub fn setup_helpers(&mut self, config: &SceneConfig) {
        for id in std::mem::take(&mut self.helpers) {
            self.remove(id);
        }

        let mut helpers = Vec::new();
        if config.grid.enabled {
            helpers.push(self.add(Node::new(
                "Grid",
                NodeKind::Grid {
                    size: config.grid.size,
                    divisions: config.grid.divisions,
                },
            )));
            helpers.push(self.add(Node::new(
                "Axes",
                NodeKind::Axes {
                    size: config.grid.axes_size,
                },
            )));
        }

        let lighting = &config.lighting;
        helpers.push(self.add(Node::new(
            "Ambient Light",
            NodeKind::Light(LightKind::Ambient {
                color: Color::from_hex(lighting.ambient_color),
                intensity: lighting.ambient_intensity,
            }),
        )));
        helpers.push(
            self.add(
                Node::new(
                    "Directional Light",
                    NodeKind::Light(LightKind::Directional {
                        color: Color::from_hex(lighting.directional_color),
                        intensity: lighting.directional_intensity,
                    }),
                )
                .with_transform(Transform::from_position(Vec3::from(
                    lighting.directional_position,
                ))),
            ),
        );
        self.helpers = helpers;
    }

    /// Helper nodes added by [`Scene::setup_helpers`].
    pub fn helpers(&self) -> &[NodeId] {
        &self.helpers
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

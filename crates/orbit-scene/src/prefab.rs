//! Detached model trees.
//!
//! A [`Prefab`] owns its nodes outright, so it can be stored (for example in
//! a template cache) independently of any scene and instantiated any number
//! of times. Geometry and materials are shared by `Arc` between copies.

use std::sync::Arc;

use glam::Mat4;
use orbit_core::{Color, FALLBACK_COLOR, LoadedMesh};

use crate::bounds::BoundingBox;
use crate::geometry::Geometry;
use crate::graph::{Node, NodeId, NodeKind, NodeTag, Scene, Transform};
use crate::material::Material;

/// One node of a detached tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabNode {
    /// Display name.
    pub name: String,
    /// What the node is.
    pub kind: NodeKind,
    /// Placement relative to the parent.
    pub transform: Transform,
    /// Visibility flag.
    pub visible: bool,
    /// Selection-unit marker.
    pub merged: bool,
    /// Owner tag.
    pub tag: NodeTag,
    /// Child nodes.
    pub children: Vec<PrefabNode>,
}

impl PrefabNode {
    /// Creates a childless prefab node from a scene node's payload.
    pub fn from_node(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            kind: node.kind.clone(),
            transform: node.transform,
            visible: node.visible,
            merged: node.merged,
            tag: node.tag.clone(),
            children: Vec::new(),
        }
    }

    fn to_node(&self) -> Node {
        let mut node = Node::new(self.name.clone(), self.kind.clone())
            .with_transform(self.transform)
            .with_tag(self.tag.clone())
            .with_merged(self.merged);
        node.visible = self.visible;
        node
    }

    fn collect_bounds(&self, parent: Mat4, acc: &mut BoundingBox) {
        let world = parent * self.transform.matrix();
        if let NodeKind::Mesh(mesh) = &self.kind {
            let b = mesh.geometry.bounds();
            if b.is_valid() {
                *acc = acc.union(&b.transform(&world));
            }
        }
        for child in &self.children {
            child.collect_bounds(world, acc);
        }
    }
}

/// An owned, scene-independent node tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefab {
    /// Top node of the tree.
    pub root: PrefabNode,
}

impl Prefab {
    /// Wraps a root node.
    pub fn new(root: PrefabNode) -> Self {
        Self { root }
    }

    /// Builds a group with one mesh child per part of a parsed model file.
    pub fn from_loaded_mesh(loaded: &LoadedMesh) -> Self {
        let children = loaded
            .parts
            .iter()
            .map(|part| {
                let color = part.color.unwrap_or(Color::from_hex(FALLBACK_COLOR));
                PrefabNode::from_node(&Node::mesh(
                    part.name.clone(),
                    Arc::new(Geometry::new(part.mesh.clone())),
                    Arc::new(Material::new(color, 0.5, 0.5)),
                ))
            })
            .collect();

        Self::new(PrefabNode {
            children,
            ..PrefabNode::from_node(&Node::group(loaded.name.clone()))
        })
    }

    /// Axis-aligned bounds of all meshes, honoring every transform in the
    /// tree including the root's. `None` when the tree has no geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut acc = BoundingBox::empty();
        self.root.collect_bounds(Mat4::IDENTITY, &mut acc);
        acc.is_valid().then_some(acc)
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(node: &PrefabNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

impl Scene {
    /// Copies the subtree rooted at `id` into a detached prefab.
    pub fn extract_prefab(&self, id: NodeId) -> Option<Prefab> {
        fn copy(scene: &Scene, id: NodeId) -> Option<PrefabNode> {
            let node = scene.get(id)?;
            let mut out = PrefabNode::from_node(node);
            out.children = node
                .children()
                .iter()
                .filter_map(|c| copy(scene, *c))
                .collect();
            Some(out)
        }
        copy(self, id).map(Prefab::new)
    }

    /// Adds a copy of the prefab under the root and returns its top node.
    pub fn instantiate(&mut self, prefab: &Prefab) -> NodeId {
        let root = self.root();
        self.build_prefab(root, &prefab.root)
    }

    /// Adds a copy of the prefab under `parent`; `None` when the parent does
    /// not exist.
    pub fn instantiate_under(&mut self, parent: NodeId, prefab: &Prefab) -> Option<NodeId> {
        self.contains(parent)
            .then(|| self.build_prefab(parent, &prefab.root))
    }

    fn build_prefab(&mut self, parent: NodeId, node: &PrefabNode) -> NodeId {
        let id = self.insert_under(parent, node.to_node());
        for child in &node.children {
            self.build_prefab(id, child);
        }
        id
    }
}

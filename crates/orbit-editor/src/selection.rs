//! Selection and picking
//!
//! Pointer events become rays, rays become hit nodes, hit nodes resolve to
//! selection units (the nearest merged ancestor wins). The engine owns the
//! selection set and the pre-selection material of every highlighted mesh.
//!
//! In connection mode clicks do not select. The first click records a
//! connector on the hit object, the second connects it to a connector on a
//! different object and drops back to selection mode.

use std::collections::HashMap;
use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3;
use orbit_scene::{
    Camera, HighlightConfig, Intersection, Material, NodeId, Scene, Transform, Viewport, raycast,
};
use tracing::{debug, info, warn};

use crate::registry::{ConnectionId, Connector, ObjectRegistry};

/// What clicks on the canvas do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Selection,
    Connection,
}

/// Modifier keys held during a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
    };

    /// Whether the multi-select modifier is held
    pub fn multi_select(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Interactive overlay controls that swallow clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    Input,
    SliderThumb,
    SliderTrack,
}

/// Element a pointer event originated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTarget {
    #[default]
    Canvas,
    Control(ControlKind),
}

/// A click in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
    pub target: EventTarget,
}

impl PointerEvent {
    /// Plain click on the canvas
    pub fn canvas(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn on_control(mut self, control: ControlKind) -> Self {
        self.target = EventTarget::Control(control);
        self
    }
}

/// First half of a two-click connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionEndpoint {
    pub node: NodeId,
    pub connector: Connector,
    /// World-space hit point of the click
    pub point: Vec3,
}

/// Result of a canvas click
#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    /// The click came from an overlay control
    Ignored,
    /// Selection after the click, in selection order
    Selected(Vec<NodeId>),
    /// A miss cleared the selection
    Cleared,
    /// A modified miss; nothing changed
    Unchanged,
    /// Connection start recorded on this node
    ConnectionStarted(NodeId),
    /// Second click completed the gesture
    Connected {
        node: NodeId,
        connection: Option<ConnectionId>,
    },
    /// No usable connector; pending state untouched
    ConnectionRejected,
    /// A miss left connection mode
    ConnectionCancelled,
}

/// Transform axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Transform of the selection: the single object's values or the mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSummary {
    pub position: Vec3,
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
    pub count: usize,
}

#[derive(Debug, Clone)]
struct Snapshot {
    mesh: NodeId,
    original: Arc<Material>,
}

/// Selection set, highlights and connection-mode state
#[derive(Debug, Default)]
pub struct SelectionEngine {
    mode: InteractionMode,
    selected: Vec<NodeId>,
    /// Per selected unit: the meshes it tinted and their materials before
    snapshots: HashMap<NodeId, Vec<Snapshot>>,
    pending: Option<ConnectionEndpoint>,
    highlight: HighlightConfig,
}

impl SelectionEngine {
    pub fn new(highlight: HighlightConfig) -> Self {
        Self {
            highlight,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn connection_mode(&self) -> bool {
        self.mode == InteractionMode::Connection
    }

    pub fn pending_connection(&self) -> Option<&ConnectionEndpoint> {
        self.pending.as_ref()
    }

    /// Switch modes; any half-finished connection is dropped either way
    pub fn set_connection_mode(&mut self, enabled: bool) {
        self.mode = if enabled {
            InteractionMode::Connection
        } else {
            InteractionMode::Selection
        };
        self.pending = None;
        info!("Interaction mode: {:?}", self.mode);
    }

    /// Nearest mesh under the pointer
    pub fn pick(
        &self,
        scene: &Scene,
        camera: &Camera,
        viewport: &Viewport,
        event: &PointerEvent,
    ) -> Option<Intersection> {
        let ray = camera.ray_from_ndc(viewport.to_ndc(event.x, event.y));
        raycast(scene, &ray).into_iter().next()
    }

    /// Handle a click on the canvas
    pub fn handle_click(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        viewport: &Viewport,
        event: &PointerEvent,
        registry: &mut ObjectRegistry,
    ) -> PickOutcome {
        if let EventTarget::Control(control) = event.target {
            debug!("Ignoring click on {:?}", control);
            return PickOutcome::Ignored;
        }

        let hit = self.pick(scene, camera, viewport, event);
        match self.mode {
            InteractionMode::Connection => self.handle_connection_click(scene, registry, hit),
            InteractionMode::Selection => self.handle_selection_click(scene, event.modifiers, hit),
        }
    }

    fn handle_selection_click(
        &mut self,
        scene: &mut Scene,
        modifiers: Modifiers,
        hit: Option<Intersection>,
    ) -> PickOutcome {
        match hit {
            Some(hit) => {
                let target = self.resolve_target(scene, hit.node);
                if modifiers.multi_select() {
                    self.toggle_selection(scene, target);
                } else {
                    self.select_single(scene, target);
                }
                PickOutcome::Selected(self.selected.clone())
            }
            None if modifiers.multi_select() => PickOutcome::Unchanged,
            None => {
                self.deselect_all(scene);
                PickOutcome::Cleared
            }
        }
    }

    fn handle_connection_click(
        &mut self,
        scene: &mut Scene,
        registry: &mut ObjectRegistry,
        hit: Option<Intersection>,
    ) -> PickOutcome {
        let Some(hit) = hit else {
            self.set_connection_mode(false);
            return PickOutcome::ConnectionCancelled;
        };

        let node = self.resolve_target(scene, hit.node);
        let connector = registry.find_nearest_connector(scene, hit.point);

        match (self.pending, connector) {
            (None, Some(connector)) => {
                self.pending = Some(ConnectionEndpoint {
                    node,
                    connector,
                    point: hit.point,
                });
                info!("Connection started at {:?}", connector.face);
                PickOutcome::ConnectionStarted(node)
            }
            (Some(start), Some(end)) if end.owner != start.connector.owner => {
                let connection = registry.connect_objects(scene, &start.connector, &end);
                self.set_connection_mode(false);
                PickOutcome::Connected { node, connection }
            }
            (None, None) => {
                warn!("No connector near the clicked point");
                PickOutcome::ConnectionRejected
            }
            (Some(_), _) => {
                warn!("Pick a connector on a different object");
                PickOutcome::ConnectionRejected
            }
        }
    }

    /// Nearest ancestor marked as merged, or the hit node itself
    pub fn resolve_target(&self, scene: &Scene, hit: NodeId) -> NodeId {
        std::iter::once(hit)
            .chain(scene.ancestors(hit))
            .find(|id| scene.get(*id).is_some_and(|n| n.merged))
            .unwrap_or(hit)
    }

    /// Add or remove `node`; returns whether it is selected afterwards
    pub fn toggle_selection(&mut self, scene: &mut Scene, node: NodeId) -> bool {
        if self.is_selected(node) {
            self.deselect(scene, node);
            false
        } else {
            self.select(scene, node);
            true
        }
    }

    /// Make `node` the only selected unit
    pub fn select_single(&mut self, scene: &mut Scene, node: NodeId) {
        self.deselect_all(scene);
        self.select(scene, node);
    }

    fn select(&mut self, scene: &mut Scene, node: NodeId) {
        if self.is_selected(node) {
            return;
        }
        self.selected.push(node);
        self.apply_highlight(scene, node);
    }

    /// Remove one unit, restoring its materials
    pub fn deselect(&mut self, scene: &mut Scene, node: NodeId) -> bool {
        let Some(index) = self.selected.iter().position(|n| *n == node) else {
            return false;
        };
        self.selected.remove(index);
        self.restore_highlight(scene, node);
        true
    }

    pub fn deselect_all(&mut self, scene: &mut Scene) {
        for node in std::mem::take(&mut self.selected) {
            self.restore_highlight(scene, node);
        }
    }

    pub fn is_selected(&self, node: NodeId) -> bool {
        self.selected.contains(&node)
    }

    /// Selected units in selection order
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn last_selected(&self) -> Option<NodeId> {
        self.selected.last().copied()
    }

    /// Two or more units are selected
    pub fn can_merge(&self) -> bool {
        self.selected.len() >= 2
    }

    fn highlight_targets(scene: &Scene, node: NodeId) -> Vec<NodeId> {
        let Some(n) = scene.get(node) else {
            return Vec::new();
        };
        let candidates = if n.merged {
            scene.traverse(node)
        } else {
            vec![node]
        };
        candidates
            .into_iter()
            .filter(|id| scene.get(*id).is_some_and(|n| n.as_mesh().is_some()))
            .collect()
    }

    fn apply_highlight(&mut self, scene: &mut Scene, node: NodeId) {
        if self.snapshots.contains_key(&node) {
            return;
        }
        let mut taken = Vec::new();
        for mesh in Self::highlight_targets(scene, node) {
            let Some(n) = scene.get_mut(mesh) else {
                continue;
            };
            let Some(original) = n.material().cloned() else {
                continue;
            };
            n.set_material(Arc::new(original.highlighted(&self.highlight)));
            taken.push(Snapshot { mesh, original });
        }
        self.snapshots.insert(node, taken);
    }

    fn restore_highlight(&mut self, scene: &mut Scene, node: NodeId) {
        let Some(taken) = self.snapshots.remove(&node) else {
            return;
        };
        for Snapshot { mesh, original } in taken {
            if let Some(n) = scene.get_mut(mesh) {
                n.set_material(original);
            }
        }
    }

    /// Position, rotation in degrees and scale of the selection.
    ///
    /// One unit reports its own values; several report the mean.
    pub fn object_properties(&self, scene: &Scene) -> Option<TransformSummary> {
        let transforms: Vec<_> = self
            .selected
            .iter()
            .filter_map(|id| scene.get(*id).map(|n| n.transform))
            .collect();
        if transforms.is_empty() {
            return None;
        }

        let count = transforms.len() as f32;
        let sum = |f: fn(&Transform) -> Vec3| -> Vec3 {
            transforms.iter().map(f).fold(Vec3::ZERO, |acc, v| acc + v)
        };
        Some(TransformSummary {
            position: sum(|t| t.position) / count,
            rotation_degrees: sum(|t| t.rotation) * (180.0 / PI) / count,
            scale: sum(|t| t.scale) / count,
            count: transforms.len(),
        })
    }

    /// Set one rotation axis, in degrees, on every selected unit
    pub fn apply_rotation(&self, scene: &mut Scene, axis: Axis, degrees: f32) {
        for id in &self.selected {
            if let Some(n) = scene.get_mut(*id) {
                n.transform.rotation[axis.index()] = degrees.to_radians();
            }
        }
    }

    /// Set one scale axis on every selected unit
    pub fn apply_scale(&self, scene: &mut Scene, axis: Axis, value: f32) {
        for id in &self.selected {
            if let Some(n) = scene.get_mut(*id) {
                n.transform.scale[axis.index()] = value;
            }
        }
    }

    /// Move every selected unit to `position`
    pub fn apply_position(&self, scene: &mut Scene, position: Vec3) {
        for id in &self.selected {
            if let Some(n) = scene.get_mut(*id) {
                n.transform.position = position;
            }
        }
    }

    /// Swap a selected node for its replacement after a rebuild, keeping
    /// its place in the selection order
    pub fn retarget(&mut self, scene: &mut Scene, old: NodeId, new: NodeId) {
        let Some(index) = self.selected.iter().position(|n| *n == old) else {
            return;
        };
        self.restore_highlight(scene, old);
        if self.is_selected(new) {
            self.selected.remove(index);
            return;
        }
        self.selected[index] = new;
        self.apply_highlight(scene, new);
    }

    /// Drop every connection touching a selected object; returns how many
    pub fn disconnect_selected(&self, scene: &Scene, registry: &mut ObjectRegistry) -> usize {
        let ids: Vec<ConnectionId> = self
            .selected
            .iter()
            .filter_map(|node| registry.object_for_node(scene, *node))
            .flat_map(|object| {
                registry
                    .object_connections(object)
                    .into_iter()
                    .map(|c| c.id)
                    .collect::<Vec<_>>()
            })
            .collect();

        let removed = ids
            .into_iter()
            .filter(|id| registry.disconnect_objects(*id))
            .count();
        if removed > 0 {
            info!("Removed {} connection(s)", removed);
        }
        removed
    }

    /// Drop a node that is about to leave the scene, without restoring
    pub fn forget(&mut self, node: NodeId) {
        self.selected.retain(|n| *n != node);
        self.snapshots.remove(&node);
    }

    /// Restore every highlight and return to selection mode
    pub fn reset(&mut self, scene: &mut Scene) {
        self.deselect_all(scene);
        self.snapshots.clear();
        self.set_connection_mode(false);
    }
}

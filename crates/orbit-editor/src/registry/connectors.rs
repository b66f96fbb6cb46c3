//! Connectors and connections between objects
//!
//! Every object exposes six connectors, one at the center of each face of
//! its world bounding box. Connecting two connectors moves the second object
//! so both points coincide.

use glam::Vec3;
use orbit_scene::{BoundingBox, Scene};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::{ObjectRegistry, SceneObject};

/// Identifier of a recorded connection
pub type ConnectionId = Uuid;

/// Face of an object's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl ConnectorFace {
    pub fn all() -> &'static [ConnectorFace] {
        &[
            ConnectorFace::PosX,
            ConnectorFace::NegX,
            ConnectorFace::PosY,
            ConnectorFace::NegY,
            ConnectorFace::PosZ,
            ConnectorFace::NegZ,
        ]
    }

    /// Outward unit normal
    pub fn normal(&self) -> Vec3 {
        match self {
            ConnectorFace::PosX => Vec3::X,
            ConnectorFace::NegX => Vec3::NEG_X,
            ConnectorFace::PosY => Vec3::Y,
            ConnectorFace::NegY => Vec3::NEG_Y,
            ConnectorFace::PosZ => Vec3::Z,
            ConnectorFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Center of this face on `bounds`
    pub fn center_on(&self, bounds: &BoundingBox) -> Vec3 {
        bounds.center() + self.normal() * bounds.size() / 2.0
    }
}

/// An attachment point on an object, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub owner: SceneObject,
    pub face: ConnectorFace,
    pub position: Vec3,
    pub normal: Vec3,
}

/// A recorded link between two connectors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub start: Connector,
    pub end: Connector,
}

impl Connection {
    pub fn involves(&self, object: SceneObject) -> bool {
        self.start.owner == object || self.end.owner == object
    }
}

impl ObjectRegistry {
    /// The six connectors of an object, empty when it has no geometry
    pub fn connectors_of(&self, scene: &Scene, object: SceneObject) -> Vec<Connector> {
        let Some(bounds) = self.world_bounds_of(scene, object) else {
            return Vec::new();
        };
        ConnectorFace::all()
            .iter()
            .map(|face| Connector {
                owner: object,
                face: *face,
                position: face.center_on(&bounds),
                normal: face.normal(),
            })
            .collect()
    }

    /// Closest connector to `point` within the snap distance
    pub fn find_nearest_connector(&self, scene: &Scene, point: Vec3) -> Option<Connector> {
        let max_distance = self.config.connector_snap_distance;
        self.objects_in_scene(scene)
            .into_iter()
            .flat_map(|object| self.connectors_of(scene, object))
            .map(|c| (c.position.distance(point), c))
            .filter(|(d, _)| *d <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, c)| c)
    }

    /// Move the end object so both connector points coincide and record
    /// the link. Refuses connectors of the same object.
    pub fn connect_objects(
        &mut self,
        scene: &mut Scene,
        start: &Connector,
        end: &Connector,
    ) -> Option<ConnectionId> {
        if start.owner == end.owner {
            warn!("Cannot connect an object to itself");
            return None;
        }

        let delta = start.position - end.position;
        if !self.translate_object(scene, end.owner, delta) {
            warn!("Connection target no longer exists");
            return None;
        }

        let moved = Connector {
            position: end.position + delta,
            ..*end
        };
        let id = Uuid::new_v4();
        self.connections.insert(
            id,
            Connection {
                id,
                start: *start,
                end: moved,
            },
        );
        info!("Connected {:?} to {:?}", start.face, end.face);
        Some(id)
    }

    /// Connections touching `object`
    pub fn object_connections(&self, object: SceneObject) -> Vec<&Connection> {
        self.connections
            .values()
            .filter(|c| c.involves(object))
            .collect()
    }

    /// Forget a connection; objects stay where they are
    pub fn disconnect_objects(&mut self, id: ConnectionId) -> bool {
        self.connections.remove(&id).is_some()
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub(crate) fn drop_connections_of(&mut self, object: SceneObject) {
        self.connections.retain(|_, c| !c.involves(object));
    }

    fn translate_object(&mut self, scene: &mut Scene, object: SceneObject, delta: Vec3) -> bool {
        match object {
            SceneObject::Parametric(id) => match self.objects.get_mut(&id) {
                Some(obj) => {
                    obj.translate(scene, delta);
                    true
                }
                None => false,
            },
            SceneObject::Module(node) => match scene.get_mut(node) {
                Some(n) => {
                    n.transform.position += delta;
                    true
                }
                None => false,
            },
        }
    }
}

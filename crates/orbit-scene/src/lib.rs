//! Scene-side plumbing for the Orbit station editor.
//!
//! This crate owns everything that lives "in the viewport":
//! - The scene graph arena ([`Scene`], [`Node`], [`NodeId`])
//! - Shared geometry and material handles
//! - Detached model trees ([`Prefab`]) for loaded modules and templates
//! - Axis-aligned bounds, the camera and ray construction
//! - Ray casting against mesh nodes
//! - Scene configuration

pub mod bounds;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod graph;
pub mod material;
pub mod prefab;
pub mod raycast;

pub use bounds::BoundingBox;
pub use camera::{Camera, Ray, Viewport};
pub use config::{CameraConfig, ConfigError, GridConfig, HighlightConfig, LightingConfig, SceneConfig};
pub use geometry::Geometry;
pub use graph::{
    LightKind, MeshNode, ModuleInstance, Node, NodeId, NodeKind, NodeTag, ObjectId, Scene,
    Transform,
};
pub use material::Material;
pub use prefab::{Prefab, PrefabNode};
pub use raycast::{Intersection, raycast};

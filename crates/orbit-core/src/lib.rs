//! Orbit Station Editor core data structures
//!
//! This crate contains the scene-independent parts of the editor:
//! - Shape, material and dimension types for parametric primitives
//! - Closed-form physical properties (volume, surface, mass, inertia)
//! - Primitive mesh generation
//! - Mesh file parsing (OBJ, STL) for loadable station modules
//! - The static station module catalog

pub mod catalog;
pub mod color;
pub mod constants;
pub mod dimensions;
pub mod inertia;
pub mod material;
pub mod mesh;
pub mod parametric;
pub mod physical;
pub mod primitive;
pub mod shape;

pub use catalog::*;
pub use color::*;
pub use constants::*;
pub use dimensions::*;
pub use inertia::*;
pub use material::*;
pub use mesh::*;
pub use parametric::*;
pub use physical::*;
pub use primitive::*;
pub use shape::*;

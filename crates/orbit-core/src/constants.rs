//! Global constants for orbit-core

/// Edge length of one dimension count, in meters
pub const UNIT_SIZE: f32 = 2.0;

/// Smallest allowed dimension count per axis
pub const DIMENSION_MIN: u32 = 1;

/// Largest allowed dimension count per axis
pub const DIMENSION_MAX: u32 = 100;

/// Density used when nothing more specific is known (kg/m^3)
pub const FALLBACK_DENSITY: f32 = 1000.0;

/// Surface color for every parametric shape (0xRRGGBB)
pub const PARAMETRIC_COLOR: u32 = 0xc7c7c7;

/// Surface color for loaded mesh parts that carry none (0xRRGGBB)
pub const FALLBACK_COLOR: u32 = 0x888888;

/// Metalness of freshly built parametric meshes
pub const PARAMETRIC_METALNESS: f32 = 0.7;

/// Roughness of freshly built parametric meshes
pub const PARAMETRIC_ROUGHNESS: f32 = 0.3;

/// Default number of segments for cylinder mesh generation
pub const CYLINDER_SEGMENTS: u32 = 32;

/// Default number of latitude segments for sphere mesh generation
pub const SPHERE_LAT_SEGMENTS: u32 = 32;

/// Default number of longitude segments for sphere mesh generation
pub const SPHERE_LON_SEGMENTS: u32 = 32;

/// Target size (largest extent, meters) when a module load names none
pub const DEFAULT_TARGET_SIZE: f32 = 5.0;

/// STL vertex comparison precision (multiply by this, then round to int)
pub const STL_VERTEX_PRECISION: f32 = 10000.0;

//! Mesh file loading (OBJ, STL)
//!
//! Loaded files become a [`LoadedMesh`]: one [`MeshPart`] per OBJ object or a
//! single part for STL. Vertex positions are scaled into meters.

mod normals;
mod obj;
mod stl;

use std::path::Path;

use crate::color::Color;
use crate::primitive::MeshData;

pub use normals::{calculate_triangle_normal, calculate_vertex_normals};
pub use obj::{load_obj, load_obj_from_bytes};
pub use stl::{load_stl, load_stl_from_bytes};

/// Length unit of the coordinates stored in a mesh file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshUnit {
    /// Meters (no scaling)
    #[default]
    Meters,
    /// Millimeters (scale by 0.001)
    Millimeters,
    /// Centimeters (scale by 0.01)
    Centimeters,
    /// Inches (scale by 0.0254)
    Inches,
}

impl MeshUnit {
    pub fn scale_factor(&self) -> f32 {
        match self {
            MeshUnit::Meters => 1.0,
            MeshUnit::Millimeters => 0.001,
            MeshUnit::Centimeters => 0.01,
            MeshUnit::Inches => 0.0254,
        }
    }
}

/// Detect mesh format from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
    Unknown,
}

impl MeshFormat {
    /// Detect format from file path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("stl") => MeshFormat::Stl,
            Some("obj") => MeshFormat::Obj,
            _ => MeshFormat::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, MeshFormat::Unknown)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeshFormat::Stl => "STL",
            MeshFormat::Obj => "OBJ",
            MeshFormat::Unknown => "Unknown",
        }
    }
}

/// One named piece of a loaded model
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub name: String,
    pub mesh: MeshData,
    /// Diffuse color from the file's material, if it has one
    pub color: Option<Color>,
}

/// A parsed model file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMesh {
    pub name: String,
    pub parts: Vec<MeshPart>,
}

impl LoadedMesh {
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertices.len()).sum()
    }
}

/// Load any supported mesh file
pub fn load_mesh(path: impl AsRef<Path>, unit: MeshUnit) -> Result<LoadedMesh, MeshError> {
    let path = path.as_ref();
    match MeshFormat::from_path(path) {
        MeshFormat::Obj => load_obj(path, unit),
        MeshFormat::Stl => load_stl(path, unit),
        MeshFormat::Unknown => Err(unsupported(path)),
    }
}

/// Parse an in-memory mesh file
pub fn load_mesh_bytes(
    name: &str,
    data: &[u8],
    format: MeshFormat,
    unit: MeshUnit,
) -> Result<LoadedMesh, MeshError> {
    match format {
        MeshFormat::Obj => load_obj_from_bytes(name, data, unit),
        MeshFormat::Stl => load_stl_from_bytes(name, data, unit),
        MeshFormat::Unknown => Err(MeshError::UnsupportedFormat(name.to_string())),
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string()
}

fn unsupported(path: &Path) -> MeshError {
    MeshError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Mesh-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty mesh: no geometry found")]
    EmptyMesh,
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(MeshFormat::from_path(Path::new("a/b.OBJ")), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_path(Path::new("roof.stl")), MeshFormat::Stl);
        assert_eq!(MeshFormat::from_path(Path::new("roof.glb")), MeshFormat::Unknown);
        assert!(!MeshFormat::Unknown.is_supported());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = load_mesh("model.glb", MeshUnit::Meters).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat(ext) if ext == "glb"));
    }

    #[test]
    fn test_unit_scale() {
        assert_eq!(MeshUnit::Millimeters.scale_factor(), 0.001);
        assert_eq!(MeshUnit::default(), MeshUnit::Meters);
    }
}

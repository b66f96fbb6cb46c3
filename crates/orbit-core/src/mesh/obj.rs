//! OBJ mesh file loading

use std::io::{BufRead, Cursor};
use std::path::Path;

use tracing::debug;

use super::normals::calculate_vertex_normals;
use super::{LoadedMesh, MeshError, MeshPart, MeshUnit};
use crate::color::Color;
use crate::primitive::MeshData;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Load an OBJ file, picking up diffuse colors from its MTL library
pub fn load_obj(path: impl AsRef<Path>, unit: MeshUnit) -> Result<LoadedMesh, MeshError> {
    let path = path.as_ref();
    let (models, materials) =
        tobj::load_obj(path, &load_options()).map_err(|e| match e {
            tobj::LoadError::OpenFileFailed | tobj::LoadError::ReadError => {
                MeshError::Io(format!("{}: {e}", path.display()))
            }
            other => MeshError::Parse(other.to_string()),
        })?;

    // A missing or broken MTL file only costs us the colors
    let materials = materials.unwrap_or_else(|e| {
        debug!("No materials for {}: {e}", path.display());
        Vec::new()
    });

    build(super::file_stem(path), models, &materials, unit)
}

/// Load an OBJ from bytes; material libraries are not resolved
pub fn load_obj_from_bytes(name: &str, data: &[u8], unit: MeshUnit) -> Result<LoadedMesh, MeshError> {
    let mut cursor = Cursor::new(data);
    load_obj_from_reader(name, &mut cursor, unit)
}

fn load_obj_from_reader(
    name: &str,
    reader: &mut impl BufRead,
    unit: MeshUnit,
) -> Result<LoadedMesh, MeshError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))
            .map_err(|e| MeshError::Parse(e.to_string()))?;

    build(name.to_string(), models, &[], unit)
}

fn build(
    name: String,
    models: Vec<tobj::Model>,
    materials: &[tobj::Material],
    unit: MeshUnit,
) -> Result<LoadedMesh, MeshError> {
    let scale = unit.scale_factor();

    let parts: Vec<MeshPart> = models
        .into_iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .map(|model| {
            let mesh = &model.mesh;
            let vertices: Vec<[f32; 3]> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0] * scale, p[1] * scale, p[2] * scale])
                .collect();

            let normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect()
            } else {
                calculate_vertex_normals(&vertices, &mesh.indices)
            };

            let color = mesh
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|m| m.diffuse)
                .map(|[r, g, b]| Color::new(r, g, b));

            MeshPart {
                name: model.name,
                mesh: MeshData {
                    vertices,
                    normals,
                    indices: mesh.indices.clone(),
                },
                color,
            }
        })
        .collect();

    if parts.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    debug!("Parsed OBJ '{}' with {} part(s)", name, parts.len());
    Ok(LoadedMesh { name, parts })
}

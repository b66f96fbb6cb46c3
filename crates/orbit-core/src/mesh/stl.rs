//! STL file loading

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use super::normals::calculate_vertex_normals;
use super::{LoadedMesh, MeshError, MeshPart, MeshUnit};
use crate::constants::STL_VERTEX_PRECISION;
use crate::primitive::MeshData;

/// Load an STL file as a single-part mesh
pub fn load_stl(path: impl AsRef<Path>, unit: MeshUnit) -> Result<LoadedMesh, MeshError> {
    let path = path.as_ref();
    let mut file = std::fs::File::open(path)
        .map_err(|e| MeshError::Io(format!("{}: {e}", path.display())))?;
    read(super::file_stem(path), &mut file, unit)
}

/// Load an STL (ASCII or binary) from bytes
pub fn load_stl_from_bytes(name: &str, data: &[u8], unit: MeshUnit) -> Result<LoadedMesh, MeshError> {
    read(name.to_string(), &mut Cursor::new(data), unit)
}

fn read<R: Read + Seek>(name: String, reader: &mut R, unit: MeshUnit) -> Result<LoadedMesh, MeshError> {
    let stl = stl_io::read_stl(reader).map_err(|e| MeshError::Parse(e.to_string()))?;
    if stl.faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mesh = weld(&stl, unit.scale_factor());
    Ok(LoadedMesh {
        parts: vec![MeshPart {
            name: name.clone(),
            mesh,
            color: None,
        }],
        name,
    })
}

/// Convert the triangle soup to an indexed mesh, merging coincident vertices
fn weld(stl: &stl_io::IndexedMesh, scale: f32) -> MeshData {
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut lookup: HashMap<[i32; 3], u32> = HashMap::new();
    let mut indices = Vec::with_capacity(stl.faces.len() * 3);

    for face in &stl.faces {
        for &vertex_idx in &face.vertices {
            let Some(vertex) = stl.vertices.get(vertex_idx) else {
                continue;
            };
            let v = [vertex[0] * scale, vertex[1] * scale, vertex[2] * scale];
            let key = v.map(|c| (c * STL_VERTEX_PRECISION).round() as i32);

            let index = *lookup.entry(key).or_insert_with(|| {
                vertices.push(v);
                (vertices.len() - 1) as u32
            });
            indices.push(index);
        }
    }

    let normals = calculate_vertex_normals(&vertices, &indices);
    MeshData {
        vertices,
        normals,
        indices,
    }
}

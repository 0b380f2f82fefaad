//! Wavefront OBJ loading.
//!
//! Every model in the file is triangulated and merged into one `Mesh`.
//! Materials are ignored; the renderer shades all geometry the same way.

use std::io::BufRead;
use std::path::Path;

use prt_math::Vec3;
use thiserror::Error;

use crate::mesh::Mesh;

/// Errors that can occur during mesh loading.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No geometry found in OBJ file")]
    NoGeometry,
}

/// Result type for loading operations.
pub type MeshResult<T> = Result<T, MeshError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load an OBJ file from disk.
pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Mesh> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = merge_models(&models)?;

    log::info!(
        "Loaded {:?}: {} models, {} vertices, {} triangles",
        path,
        models.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load OBJ data from an in-memory string. `mtllib` references are ignored.
pub fn load_obj_from_str(source: &str) -> MeshResult<Mesh> {
    let mut reader = std::io::Cursor::new(source.as_bytes());
    load_obj_from_reader(&mut reader)
}

fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> MeshResult<Mesh> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    merge_models(&models)
}

/// Concatenate all models, rebasing each model's indices.
fn merge_models(models: &[tobj::Model]) -> MeshResult<Mesh> {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let base = positions.len() as u32;
        positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        indices.extend(model.mesh.indices.iter().map(|i| base + i));
    }

    if indices.len() < 3 {
        return Err(MeshError::NoGeometry);
    }

    Ok(Mesh::new(positions, indices))
}

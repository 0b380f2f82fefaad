//! PRT Core - scene geometry input for the PRT ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh geometry**: `Mesh`, a flat position/index triangle list
//! - **OBJ support**: loading Wavefront OBJ files into a `Mesh`
//!
//! # Example
//!
//! ```ignore
//! use prt_core::load_obj;
//!
//! let mesh = load_obj("bunny.obj")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use mesh::Mesh;
pub use obj::{load_obj, load_obj_from_str, MeshError, MeshResult};

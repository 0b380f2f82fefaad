//! PRT math - vector types and ray/box/interval primitives shared by the
//! renderer crates.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// RGB color, components nominally in [0, 1].
pub type Color = Vec3;

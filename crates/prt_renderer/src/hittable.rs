//! Hittable trait and HitRecord for ray-object intersection.

use prt_math::{Interval, Ray, Vec3};

/// Which kind of primitive produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Ground,
    Sphere,
    Box,
    Triangle,
}

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Outward surface normal. Not necessarily unit length.
    pub normal: Vec3,
    /// Primitive that was hit
    pub kind: PrimitiveKind,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns the nearest such intersection, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

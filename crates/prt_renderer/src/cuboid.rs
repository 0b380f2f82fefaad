//! Axis-aligned box primitive.

use crate::hittable::{HitRecord, Hittable, PrimitiveKind};
use prt_math::{Aabb, Interval, Ray, Vec3};

/// A solid axis-aligned box, described by its center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    bounds: Aabb,
}

impl Cuboid {
    /// Create a box centered at `center` reaching `half_extents` along each axis.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            bounds: Aabb::from_center(center, half_extents),
        }
    }

    /// Outward normal of the face nearest to `p`.
    fn face_normal(&self, p: Vec3) -> Vec3 {
        let local = (p - self.bounds.centroid()) / self.bounds.half_extents();
        let abs = local.abs();

        if abs.x >= abs.y && abs.x >= abs.z {
            Vec3::new(local.x.signum(), 0.0, 0.0)
        } else if abs.y >= abs.z {
            Vec3::new(0.0, local.y.signum(), 0.0)
        } else {
            Vec3::new(0.0, 0.0, local.z.signum())
        }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Entry and exit parameters over the whole line
        let span = self.bounds.hit_range(ray, Interval::UNIVERSE)?;

        let t = if ray_t.surrounds(span.min) {
            span.min
        } else if ray_t.surrounds(span.max) {
            span.max
        } else {
            return None;
        };

        let p = ray.at(t);
        Some(HitRecord {
            t,
            p,
            normal: self.face_normal(p),
            kind: PrimitiveKind::Box,
        })
    }
}

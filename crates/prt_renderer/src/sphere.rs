//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable, PrimitiveKind};
use prt_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    kind: PrimitiveKind,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            kind: PrimitiveKind::Sphere,
        }
    }

    /// Create the large sphere used as the scene's ground.
    pub fn ground(center: Vec3, radius: f32) -> Self {
        Self {
            kind: PrimitiveKind::Ground,
            ..Self::new(center, radius)
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            // Outward even when the ray starts inside
            normal: (p - self.center) / self.radius,
            kind: self.kind,
        })
    }
}

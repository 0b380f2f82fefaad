//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{HitRecord, Hittable, PrimitiveKind};
use prt_math::{Aabb, Interval, Ray, Vec3};

/// A two-sided triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Geometric normal `(v1 - v0) x (v2 - v0)`, not normalized
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0);
        Self { v0, v1, v2, normal }
    }

    /// Create a triangle from a `[v0, v1, v2]` triplet.
    pub fn from_vertices(vertices: [Vec3; 3]) -> Self {
        Self::new(vertices[0], vertices[1], vertices[2])
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            self.v0.min(self.v1).min(self.v2),
            self.v0.max(self.v1).max(self.v2),
        )
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.normal,
            kind: PrimitiveKind::Triangle,
        })
    }
}

// Transform utilities for Mat4
//
// Homogeneous point/vector application for camera-to-world mapping. Unlike
// glam's affine helpers these never assume the bottom row is (0, 0, 0, 1);
// the w component is simply dropped after the multiply.

use glam::{Mat4, Vec3};

/// Extension trait for Mat4 with homogeneous transform helpers.
pub trait Mat4Ext {
    /// Transform a point (implicit w=1); translation applies.
    fn apply_to_point(&self, point: Vec3) -> Vec3;

    /// Transform a vector (implicit w=0); translation does not apply.
    fn apply_to_vector(&self, vector: Vec3) -> Vec3;

    /// Inverse of the matrix, or `None` when it is singular.
    fn try_inverse(&self) -> Option<Mat4>;
}

impl Mat4Ext for Mat4 {
    fn apply_to_point(&self, point: Vec3) -> Vec3 {
        (*self * point.extend(1.0)).truncate()
    }

    fn apply_to_vector(&self, vector: Vec3) -> Vec3 {
        (*self * vector.extend(0.0)).truncate()
    }

    fn try_inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.inverse())
    }
}

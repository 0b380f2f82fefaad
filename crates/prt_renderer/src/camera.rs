//! Pixel to world-space ray mapping.
//!
//! Rays start at the camera-space origin and pass through a virtual image
//! plane at depth -1 that spans [-aspect, aspect] x [-1, 1]. Both are then
//! carried to world space by the inverse of the view matrix.

use prt_math::{Mat4, Mat4Ext, Ray, Vec3};

/// Ray generator for one image size and one view transform.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    width: u32,
    height: u32,
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    world_from_view: Mat4,
}

impl Camera {
    /// Build the image plane for `width x height` pixels seen through `view`
    /// (world to camera).
    pub fn new(width: u32, height: u32, view: Mat4) -> Self {
        debug_assert!(width > 0 && height > 0, "image must not be empty");

        let aspect = width as f32 / height as f32;
        let world_from_view = view.try_inverse().unwrap_or_else(|| {
            log::warn!("View matrix is not invertible, falling back to identity");
            Mat4::IDENTITY
        });

        Self {
            width,
            height,
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::new(-aspect, -1.0, -1.0),
            horizontal: Vec3::new(2.0 * aspect, 0.0, 0.0),
            vertical: Vec3::new(0.0, 2.0, 0.0),
            world_from_view,
        }
    }

    /// World-space ray through the center of pixel `(x, y)`; `y = 0` is the
    /// bottom row.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let u = (x as f32 + 0.5) / self.width as f32;
        let v = (y as f32 + 0.5) / self.height as f32;
        let direction = self.lower_left_corner + u * self.horizontal + v * self.vertical;

        Ray::new(
            self.world_from_view.apply_to_point(self.origin),
            self.world_from_view.apply_to_vector(direction),
        )
    }
}

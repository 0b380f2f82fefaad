//! PRT Renderer - progressive scanline ray tracing.
//!
//! Renders a fixed set of glass primitives one image row at a time and
//! accumulates the result across frames, so a caller can interleave
//! rendering with presenting the partially refined image.
//!
//! # Example
//!
//! ```ignore
//! use prt_renderer::{RenderConfig, RtContext, Scene, SceneOptions};
//!
//! let scene = Scene::setup(&SceneOptions::default())?;
//! let mut rtx = RtContext::new(RenderConfig::default());
//! while !rtx.is_converged() {
//!     rtx.update_image(&scene);
//! }
//! ```

mod camera;
mod context;
mod cuboid;
mod display;
mod hittable;
mod scene;
mod shading;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use context::{RenderConfig, RtContext};
pub use cuboid::Cuboid;
pub use display::{color_to_rgba, linear_to_gamma, resolve_pixel};
pub use hittable::{HitRecord, Hittable, PrimitiveKind};
pub use scene::{Scene, SceneOptions, DEFAULT_MESH_OFFSET};
pub use shading::{color, fresnel, reflect, refract, sky_color, SurfaceModel, DEFAULT_IOR};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from prt_math
pub use prt_math::{Aabb, Color, Interval, Mat4, Ray, Vec3, Vec4};

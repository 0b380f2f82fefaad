//! Recursive radiance evaluation.
//!
//! Every surface is shaded with the same material, chosen by
//! [`RenderConfig::surface`]. Rays that escape the scene pick up the
//! ground-to-sky gradient, which is the only light source.

use prt_math::{Color, Ray, Vec3};

use crate::context::RenderConfig;
use crate::scene::Scene;

/// Index of refraction of the default glass material.
pub const DEFAULT_IOR: f32 = 1.5;

/// Far end of the hit search range.
const MAX_HIT_DISTANCE: f32 = 9999.0;

/// Material applied to every primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceModel {
    /// Glass: Fresnel-weighted mix of a reflected and a refracted ray.
    Dielectric { ior: f32 },
    /// Perfect mirror: a single reflected ray.
    Mirror,
}

impl Default for SurfaceModel {
    fn default() -> Self {
        SurfaceModel::Dielectric { ior: DEFAULT_IOR }
    }
}

/// Compute the color seen along `ray`, allowing `max_bounces` further
/// recursive rays. A negative budget yields black.
pub fn color(config: &RenderConfig, scene: &Scene, ray: &Ray, max_bounces: i32) -> Color {
    if max_bounces < 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit_world(ray, 0.0, MAX_HIT_DISTANCE) else {
        return sky_color(config, ray);
    };

    let normal = rec.normal.normalize_or_zero();
    if config.show_normals {
        return normal * 0.5 + 0.5;
    }

    let direction = ray.direction();
    let outside = direction.dot(normal) < 0.0;
    // Scene-scale offset that pushes secondary origins off the surface
    let bias = 0.5 * rec.p;

    match config.surface {
        SurfaceModel::Mirror => {
            let origin = if outside { rec.p + bias } else { rec.p - bias };
            let reflected = Ray::new(origin, reflect(direction, normal));
            color(config, scene, &reflected, max_bounces - 1)
        }
        SurfaceModel::Dielectric { ior } => {
            let kr = fresnel(direction, normal, ior);

            let refraction_color = if kr < 1.0 {
                let origin = if outside { rec.p - bias } else { rec.p + bias };
                let refracted = Ray::new(origin, refract(direction, normal, ior));
                color(config, scene, &refracted, max_bounces - 1)
            } else {
                Color::ZERO
            };

            let origin = if outside { rec.p + bias } else { rec.p - bias };
            let reflected = Ray::new(origin, reflect(direction, normal));
            let reflection_color = color(config, scene, &reflected, max_bounces - 1);

            reflection_color * kr + refraction_color * (1.0 - kr)
        }
    }
}

/// Background gradient: ground color looking straight down, sky color
/// straight up.
pub fn sky_color(config: &RenderConfig, ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let t = 0.5 * (unit_direction.y + 1.0);
    config.ground_color * (1.0 - t) + config.sky_color * t
}

/// Mirror `incident` about `normal` (unit length).
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Refract `incident` through a surface with outward unit `normal` between
/// vacuum and a medium of index `ior` (Snell's law). The side is taken from
/// the sign of `incident . normal`. Returns zero when no transmitted ray
/// exists.
pub fn refract(incident: Vec3, normal: Vec3, ior: f32) -> Vec3 {
    let incident = incident.normalize_or_zero();
    let mut cosi = incident.dot(normal).clamp(-1.0, 1.0);
    let (mut etai, mut etat) = (1.0, ior);
    let mut n = normal;
    if cosi < 0.0 {
        cosi = -cosi;
    } else {
        std::mem::swap(&mut etai, &mut etat);
        n = -normal;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k <= 0.0 {
        Vec3::ZERO
    } else {
        eta * incident + (eta * cosi - k.sqrt()) * n
    }
}

/// Fraction of light reflected at the interface, from the unpolarized
/// Fresnel equations. Total internal reflection gives 1.
pub fn fresnel(incident: Vec3, normal: Vec3, ior: f32) -> f32 {
    let cosi = incident.normalize_or_zero().dot(normal).clamp(-1.0, 1.0);
    let (etai, etat) = if cosi > 0.0 { (ior, 1.0) } else { (1.0, ior) };

    // Snell's law for the transmitted sine
    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }

    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();
    let rs = ((etat * cosi) - (etai * cost)) / ((etat * cosi) + (etai * cost));
    let rp = ((etai * cosi) - (etat * cost)) / ((etai * cosi) + (etat * cost));
    ((rs * rs + rp * rp) / 2.0).clamp(0.0, 1.0)
}

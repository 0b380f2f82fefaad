//! Scene aggregate and closest-hit queries.
//!
//! The scene is an owned value built once by [`Scene::setup`] and only read
//! while rendering, so it can be shared by reference across worker threads.

use std::path::PathBuf;

use prt_core::{load_obj, Mesh, MeshResult};
use prt_math::{Aabb, Interval, Ray, Vec3};

use crate::cuboid::Cuboid;
use crate::hittable::{HitRecord, Hittable};
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Vertical offset applied to loaded meshes so they rest on the ground.
pub const DEFAULT_MESH_OFFSET: Vec3 = Vec3::new(0.0, 0.135, 0.0);

/// Inputs to [`Scene::setup`].
#[derive(Debug, Clone)]
pub struct SceneOptions {
    /// OBJ file to load into the mesh slot. `None` leaves the mesh empty.
    pub mesh_path: Option<PathBuf>,
    /// Translation applied to every mesh vertex.
    pub mesh_offset: Vec3,
    /// Add the three demo boxes below the spheres.
    pub boxes: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            mesh_path: None,
            mesh_offset: DEFAULT_MESH_OFFSET,
            boxes: false,
        }
    }
}

/// Everything a ray can hit.
#[derive(Debug, Clone)]
pub struct Scene {
    pub ground: Sphere,
    pub spheres: Vec<Sphere>,
    pub boxes: Vec<Cuboid>,
    pub mesh: Vec<Triangle>,
    /// Bounds of `mesh`; rays that miss it skip every triangle test.
    pub mesh_bbox: Aabb,
}

impl Scene {
    /// Create a scene containing only the ground sphere.
    pub fn new(ground: Sphere) -> Self {
        Self {
            ground,
            spheres: Vec::new(),
            boxes: Vec::new(),
            mesh: Vec::new(),
            mesh_bbox: Aabb::EMPTY,
        }
    }

    /// Build the demo scene: ground, three glass spheres, and optionally the
    /// demo boxes and a mesh loaded from disk.
    pub fn setup(options: &SceneOptions) -> MeshResult<Self> {
        let mut scene = Self::new(Sphere::ground(Vec3::new(0.0, -1000.5, 0.0), 1000.0));
        scene.spheres = vec![
            Sphere::new(Vec3::new(0.0, 0.0, 0.0), 0.5),
            Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.5),
            Sphere::new(Vec3::new(-1.0, 0.0, 0.0), 0.5),
        ];

        if options.boxes {
            scene.boxes = vec![
                Cuboid::new(Vec3::new(0.0, -0.25, 0.0), Vec3::splat(0.25)),
                Cuboid::new(Vec3::new(1.0, -0.25, 0.0), Vec3::splat(0.25)),
                Cuboid::new(Vec3::new(-1.0, -0.25, 0.0), Vec3::splat(0.25)),
            ];
        }

        if let Some(path) = &options.mesh_path {
            let mesh = load_obj(path)?.translated(options.mesh_offset);
            scene.set_mesh(&mesh);
        }

        log::info!(
            "Scene ready: {} spheres, {} boxes, {} mesh triangles",
            scene.spheres.len(),
            scene.boxes.len(),
            scene.mesh.len()
        );
        Ok(scene)
    }

    /// Replace the mesh slot with the triangles of `mesh`.
    pub fn set_mesh(&mut self, mesh: &Mesh) {
        self.mesh.clear();
        self.mesh_bbox = Aabb::EMPTY;
        for vertices in mesh.extract_triangle_vertices() {
            self.add_triangle(Triangle::from_vertices(vertices));
        }
    }

    /// Append one triangle to the mesh slot, growing its bounds.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.mesh_bbox = Aabb::surrounding(&self.mesh_bbox, &triangle.bounding_box());
        self.mesh.push(triangle);
    }

    /// Total number of primitives, ground included.
    pub fn primitive_count(&self) -> usize {
        1 + self.spheres.len() + self.boxes.len() + self.mesh.len()
    }

    /// Closest intersection strictly inside `(t_min, t_max)`.
    ///
    /// Primitives are tested ground, spheres, boxes, mesh; every accepted
    /// hit lowers the upper bound, so the result is the nearest overall.
    pub fn hit_world(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord> {
        let mut search = Interval::new(t_min, t_max);
        let mut closest = None;

        nearest(std::iter::once(&self.ground), ray, &mut search, &mut closest);
        nearest(&self.spheres, ray, &mut search, &mut closest);
        nearest(&self.boxes, ray, &mut search, &mut closest);
        if !self.mesh.is_empty() && self.mesh_bbox.hit(ray, search) {
            nearest(&self.mesh, ray, &mut search, &mut closest);
        }

        closest
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.hit_world(ray, ray_t.min, ray_t.max)
    }
}

fn nearest<'a, H, I>(objects: I, ray: &Ray, search: &mut Interval, closest: &mut Option<HitRecord>)
where
    H: Hittable + 'a,
    I: IntoIterator<Item = &'a H>,
{
    for object in objects {
        if let Some(rec) = object.hit(ray, *search) {
            *search = search.with_max(rec.t);
            *closest = Some(rec);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::PrimitiveKind;

    fn demo_scene() -> Scene {
        let mut scene = Scene::setup(&SceneOptions {
            boxes: true,
            ..Default::default()
        })
        .unwrap();
        scene.add_triangle(Triangle::new(
            Vec3::new(-3.0, -0.5, -2.0),
            Vec3::new(3.0, -0.5, -2.0),
            Vec3::new(0.0, 2.0, -2.0),
        ));
        scene
    }

    /// Individual hits of every primitive along `ray`.
    fn all_hits(scene: &Scene, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        let mut hits = Vec::new();
        hits.extend(scene.ground.hit(ray, ray_t));
        hits.extend(scene.spheres.iter().filter_map(|s| s.hit(ray, ray_t)));
        hits.extend(scene.boxes.iter().filter_map(|b| b.hit(ray, ray_t)));
        hits.extend(scene.mesh.iter().filter_map(|t| t.hit(ray, ray_t)));
        hits
    }

    #[test]
    fn test_default_setup() {
        let scene = Scene::setup(&SceneOptions::default()).unwrap();

        assert_eq!(scene.spheres.len(), 3);
        assert!(scene.boxes.is_empty());
        assert!(scene.mesh.is_empty());
        assert_eq!(scene.primitive_count(), 4);
    }

    #[test]
    fn test_setup_missing_mesh_is_an_error() {
        let options = SceneOptions {
            mesh_path: Some(PathBuf::from("does/not/exist.obj")),
            ..Default::default()
        };
        assert!(Scene::setup(&options).is_err());
    }

    #[test]
    fn test_hit_world_returns_closest() {
        let scene = demo_scene();
        let ray_t = Interval::new(0.0, 9999.0);

        let directions = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.3, -0.2, -1.0),
            Vec3::new(-0.35, -0.1, -1.0),
            Vec3::new(0.0, -1.0, -0.2),
            Vec3::new(1.0, -0.2, -0.5),
        ];
        for dir in directions {
            let ray = Ray::new(Vec3::new(0.0, 0.2, 4.0), dir);
            let closest = scene.hit_world(&ray, ray_t.min, ray_t.max);
            let hits = all_hits(&scene, &ray, ray_t);

            match closest {
                Some(rec) => {
                    for other in &hits {
                        assert!(rec.t <= other.t, "{:?} is farther than {:?}", rec, other);
                    }
                }
                None => assert!(hits.is_empty()),
            }
        }
    }

    #[test]
    fn test_hit_world_order_does_not_matter() {
        // Far sphere listed first, near sphere second
        let mut scene = Scene::new(Sphere::ground(Vec3::new(0.0, -1000.5, 0.0), 1000.0));
        scene.spheres.push(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 0.5));
        scene.spheres.push(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.5));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit_world(&ray, 0.0, 9999.0).unwrap();
        assert!((rec.t - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_hit_world_respects_range() {
        let scene = demo_scene();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 4.0), Vec3::NEG_Z);

        // Centre sphere front face is at t=3.5
        assert!(scene.hit_world(&ray, 0.0, 3.0).is_none());
        let rec = scene.hit_world(&ray, 0.0, 9999.0).unwrap();
        assert_eq!(rec.kind, PrimitiveKind::Sphere);
        assert!((rec.t - 3.5).abs() < 1e-4);
    }

    #[test]
    fn test_mesh_behind_spheres_is_occluded() {
        let scene = demo_scene();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 4.0), Vec3::NEG_Z);

        // Above the spheres the triangle at z=-2 is the first thing hit
        let rec = scene.hit_world(&ray, 0.0, 9999.0).unwrap();
        assert_eq!(rec.kind, PrimitiveKind::Triangle);
        assert!((rec.t - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_mesh_from_geometry() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        )
        .translated(DEFAULT_MESH_OFFSET);

        let mut scene = Scene::new(Sphere::ground(Vec3::new(0.0, -1000.5, 0.0), 1000.0));
        scene.set_mesh(&mesh);

        assert_eq!(scene.mesh.len(), 1);
        assert!((scene.mesh_bbox.y.min - 0.135).abs() < 1e-5);
    }

    #[test]
    fn test_straight_down_hits_ground() {
        let scene = Scene::setup(&SceneOptions::default()).unwrap();
        let ray = Ray::new(Vec3::new(5.0, 1.0, 5.0), Vec3::NEG_Y);

        let rec = scene.hit_world(&ray, 0.0, 9999.0).unwrap();
        assert_eq!(rec.kind, PrimitiveKind::Ground);
    }
}

//! TOML render description.
//!
//! Every table and key is optional; missing values fall back to the
//! renderer defaults.
//!
//! ```toml
//! [render]
//! width = 640
//! height = 480
//! max_bounces = 6
//! max_frames = 1
//! ground_color = [1.0, 1.0, 1.0]
//! sky_color = [0.5, 0.7, 1.0]
//! material = "dielectric"   # or "mirror"
//! ior = 1.5
//!
//! [camera]
//! eye = [0.0, 0.5, 3.0]
//! target = [0.0, 0.0, 0.0]
//! up = [0.0, 1.0, 0.0]
//!
//! [scene]
//! mesh = "assets/bunny.obj"
//! mesh_offset = [0.0, 0.135, 0.0]
//! boxes = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use prt_math::{Mat4, Vec3};
use prt_renderer::{RenderConfig, SceneOptions, SurfaceModel, DEFAULT_IOR, DEFAULT_MESH_OFFSET};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Dielectric,
    Mirror,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    pub width: u32,
    pub height: u32,
    pub max_bounces: i32,
    pub max_frames: i32,
    pub ground_color: [f32; 3],
    pub sky_color: [f32; 3],
    pub show_normals: bool,
    pub material: MaterialKind,
    pub ior: f32,
}

impl Default for RenderSection {
    fn default() -> Self {
        let defaults = RenderConfig::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            max_bounces: defaults.max_bounces,
            // A deterministic tracer gains nothing from more than one pass
            max_frames: 1,
            ground_color: defaults.ground_color.to_array(),
            sky_color: defaults.sky_color.to_array(),
            show_normals: defaults.show_normals,
            material: MaterialKind::Dielectric,
            ior: DEFAULT_IOR,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.5, 3.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraSection {
    /// World to camera matrix.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.target),
            Vec3::from_array(self.up),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneSection {
    pub mesh: Option<PathBuf>,
    pub mesh_offset: [f32; 3],
    pub boxes: bool,
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            mesh: None,
            mesh_offset: DEFAULT_MESH_OFFSET.to_array(),
            boxes: false,
        }
    }
}

/// Parsed render description file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub render: RenderSection,
    pub camera: CameraSection,
    pub scene: SceneSection,
}

impl FileConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.render.width > 0 && self.render.height > 0,
            "image size must be positive, got {}x{}",
            self.render.width,
            self.render.height
        );
        ensure!(self.render.max_frames >= 1, "max_frames must be at least 1");
        ensure!(self.render.ior > 0.0, "ior must be positive");
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        let surface = match self.render.material {
            MaterialKind::Dielectric => SurfaceModel::Dielectric { ior: self.render.ior },
            MaterialKind::Mirror => SurfaceModel::Mirror,
        };
        RenderConfig {
            width: self.render.width,
            height: self.render.height,
            view: self.camera.view(),
            max_bounces: self.render.max_bounces,
            max_frames: self.render.max_frames,
            ground_color: Vec3::from_array(self.render.ground_color),
            sky_color: Vec3::from_array(self.render.sky_color),
            show_normals: self.render.show_normals,
            surface,
        }
    }

    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            mesh_path: self.scene.mesh.clone(),
            mesh_offset: Vec3::from_array(self.scene.mesh_offset),
            boxes: self.scene.boxes,
        }
    }
}

//! Progressive render state.
//!
//! [`RtContext`] owns an accumulation buffer and renders one scanline per
//! [`RtContext::update_image`] call, so a display loop can keep presenting
//! the buffer between calls. Each accumulator holds summed RGB in `xyz` and
//! the number of samples in `w`.

use prt_math::{Color, Mat4, Vec3, Vec4};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::display::{color_to_rgba, resolve_pixel};
use crate::scene::Scene;
use crate::shading::{color, SurfaceModel};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// World to camera transform
    pub view: Mat4,
    /// Recursion budget per primary ray; -1 renders black
    pub max_bounces: i32,
    /// Number of full frames to accumulate before the counters stop
    pub max_frames: i32,
    /// Background color looking straight down
    pub ground_color: Color,
    /// Background color looking straight up
    pub sky_color: Color,
    /// Shade hits with their normal instead of the material
    pub show_normals: bool,
    /// Material applied to every primitive
    pub surface: SurfaceModel,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            view: Mat4::look_at_rh(Vec3::new(0.0, 0.5, 3.0), Vec3::ZERO, Vec3::Y),
            max_bounces: 10,
            max_frames: 1000,
            ground_color: Color::new(1.0, 1.0, 1.0),
            sky_color: Color::new(0.5, 0.7, 1.0),
            show_normals: false,
            surface: SurfaceModel::default(),
        }
    }
}

/// Configuration plus accumulation state of a progressive render.
#[derive(Debug, Clone)]
pub struct RtContext {
    pub config: RenderConfig,
    /// Row-major accumulators, row 0 at the bottom of the image
    pub image: Vec<Vec4>,
    /// Completed full passes; -1 requests a blended restart
    pub current_frame: i32,
    /// Next scanline to render
    pub current_line: u32,
    /// Skip all updates while set
    pub freeze: bool,
}

impl RtContext {
    /// Create a context with an empty accumulation buffer.
    pub fn new(config: RenderConfig) -> Self {
        let mut rtx = Self {
            config,
            image: Vec::new(),
            current_frame: 0,
            current_line: 0,
            freeze: false,
        };
        rtx.reset_image();
        rtx
    }

    /// Number of pixels the current configuration asks for.
    pub fn pixel_count(&self) -> usize {
        self.config.width as usize * self.config.height as usize
    }

    /// A zero width or height leaves nothing to render; updates are no-ops.
    fn is_empty_image(&self) -> bool {
        self.config.width == 0 || self.config.height == 0
    }

    /// True once `max_frames` full passes have been accumulated.
    pub fn is_converged(&self) -> bool {
        self.current_frame >= self.config.max_frames
    }

    /// Render scanline `y` and add one sample to each of its pixels.
    ///
    /// While `current_frame <= 0` every accumulator is first collapsed to its
    /// clamped average with a matching weight, so the old image fades into
    /// the new one instead of flashing to black.
    pub fn update_line(&mut self, scene: &Scene, y: u32) {
        self.ensure_image_size();
        if self.is_empty_image() {
            return;
        }
        if y >= self.config.height {
            log::warn!("Scanline {} is outside an image of height {}", y, self.config.height);
            return;
        }

        let nx = self.config.width as usize;
        let camera = Camera::new(self.config.width, self.config.height, self.config.view);
        let restart = self.current_frame <= 0;
        let config = &self.config;

        let start = y as usize * nx;
        let row = &mut self.image[start..start + nx];
        row.par_iter_mut().enumerate().for_each(|(x, pixel)| {
            let ray = camera.get_ray(x as u32, y);
            if restart {
                *pixel = blend_restart(*pixel);
            }
            let c = color(config, scene, &ray, config.max_bounces);
            *pixel += c.extend(1.0);
        });
    }

    /// Advance the render by one scanline.
    pub fn update_image(&mut self, scene: &Scene) {
        if self.freeze {
            return;
        }
        self.ensure_image_size();
        if self.is_empty_image() {
            return;
        }
        let height = self.config.height;

        self.update_line(scene, self.current_line % height);

        if self.current_frame < self.config.max_frames {
            self.current_line += 1;
            if self.current_line >= height {
                self.current_frame += 1;
                self.current_line %= height;
                log::debug!("Frame {} complete", self.current_frame);
                if self.is_converged() {
                    log::info!("Converged after {} frames", self.current_frame);
                }
            }
        }
    }

    /// Clear the image and restart from the first scanline.
    pub fn reset_image(&mut self) {
        self.image.clear();
        self.image.resize(self.pixel_count(), Vec4::ZERO);
        self.current_frame = 0;
        self.current_line = 0;
        self.freeze = false;
    }

    /// Restart accumulation, blending from the current image.
    pub fn reset_accumulation(&mut self) {
        log::debug!("Accumulation reset at frame {}", self.current_frame);
        self.current_frame = -1;
    }

    /// Averaged colors, row-major, bottom row first.
    pub fn resolved(&self) -> Vec<Color> {
        self.image.iter().map(|acc| resolve_pixel(*acc)).collect()
    }

    /// Gamma-corrected 8-bit RGBA bytes, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let nx = self.config.width as usize;
        let mut bytes = Vec::with_capacity(self.image.len() * 4);
        if nx == 0 {
            return bytes;
        }
        for row in self.image.chunks_exact(nx).rev() {
            for acc in row {
                bytes.extend_from_slice(&color_to_rgba(resolve_pixel(*acc)));
            }
        }
        bytes
    }

    /// Match the buffer length to the configured size. Contents are not
    /// remapped.
    fn ensure_image_size(&mut self) {
        let count = self.pixel_count();
        if self.image.len() != count {
            log::debug!("Resizing image from {} to {} pixels", self.image.len(), count);
            self.image.resize(count, Vec4::ZERO);
        }
    }
}

/// Collapse an accumulator to its clamped average, weight included.
#[inline]
fn blend_restart(accumulator: Vec4) -> Vec4 {
    (accumulator / accumulator.w.max(1.0)).clamp(Vec4::ZERO, Vec4::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneOptions;

    fn scene() -> Scene {
        Scene::setup(&SceneOptions::default()).unwrap()
    }

    fn context(width: u32, height: u32) -> RtContext {
        RtContext::new(RenderConfig {
            width,
            height,
            max_bounces: 3,
            max_frames: 10,
            ..Default::default()
        })
    }

    fn expected_color(rtx: &RtContext, scene: &Scene, x: u32, y: u32) -> Color {
        let camera = Camera::new(rtx.config.width, rtx.config.height, rtx.config.view);
        color(&rtx.config, scene, &camera.get_ray(x, y), rtx.config.max_bounces)
    }

    #[test]
    fn test_new_context_is_empty() {
        let rtx = context(4, 3);
        assert_eq!(rtx.image.len(), 12);
        assert!(rtx.image.iter().all(|p| *p == Vec4::ZERO));
        assert_eq!(rtx.current_frame, 0);
        assert_eq!(rtx.current_line, 0);
        assert!(!rtx.freeze);
    }

    #[test]
    fn test_scanline_progress() {
        let scene = scene();
        let mut rtx = context(2, 4);

        for expected_line in 0..4u32 {
            assert_eq!(rtx.current_line, expected_line);
            rtx.update_image(&scene);

            // Only the visited row has a sample
            let row = &rtx.image[expected_line as usize * 2..expected_line as usize * 2 + 2];
            assert!(row.iter().all(|p| p.w == 1.0));
        }

        assert_eq!(rtx.current_frame, 1);
        assert_eq!(rtx.current_line, 0);
        assert!(rtx.image.iter().all(|p| p.w == 1.0));
    }

    #[test]
    fn test_freeze_leaves_state_untouched() {
        let scene = scene();
        let mut rtx = context(3, 3);
        rtx.update_image(&scene);
        rtx.freeze = true;

        let image = rtx.image.clone();
        let (frame, line) = (rtx.current_frame, rtx.current_line);
        for _ in 0..5 {
            rtx.update_image(&scene);
        }

        assert_eq!(rtx.image, image);
        assert_eq!(rtx.current_frame, frame);
        assert_eq!(rtx.current_line, line);
    }

    #[test]
    fn test_reset_accumulation_blend() {
        let scene = scene();
        let mut rtx = context(1, 1);
        rtx.current_frame = 5;
        rtx.image[0] = Vec4::new(2.0, 4.0, 6.0, 2.0);

        rtx.reset_accumulation();
        assert_eq!(rtx.current_frame, -1);
        rtx.update_image(&scene);

        // (2,4,6,2) / 2 = (1,2,3,1), clamped to (1,1,1,1), plus one sample
        let c = expected_color(&rtx, &scene, 0, 0);
        let pixel = rtx.image[0];
        assert_eq!(pixel.w, 2.0);
        assert!((pixel.truncate() - (Vec3::ONE + c)).length() < 1e-5);
        assert_eq!(rtx.current_frame, 0);
    }

    #[test]
    fn test_blend_restart_arithmetic() {
        assert_eq!(blend_restart(Vec4::new(2.0, 4.0, 6.0, 2.0)), Vec4::ONE);
        assert_eq!(
            blend_restart(Vec4::new(0.5, 1.0, 1.5, 4.0)),
            Vec4::new(0.125, 0.25, 0.375, 1.0)
        );
        // Fewer than one sample is not scaled up
        assert_eq!(
            blend_restart(Vec4::new(0.2, 0.4, 0.6, 0.5)),
            Vec4::new(0.2, 0.4, 0.6, 0.5)
        );
    }

    #[test]
    fn test_accumulation_converges_to_single_sample() {
        let scene = scene();
        let mut rtx = context(3, 2);
        let height = rtx.config.height;

        for frames in 1..=4 {
            for _ in 0..height {
                rtx.update_image(&scene);
            }
            assert_eq!(rtx.current_frame, frames);

            let resolved = rtx.resolved();
            for y in 0..height {
                for x in 0..rtx.config.width {
                    let i = (y * rtx.config.width + x) as usize;
                    assert_eq!(rtx.image[i].w, frames as f32);
                    let single = expected_color(&rtx, &scene, x, y);
                    assert!((resolved[i] - single).length() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_counters_stop_at_max_frames() {
        let scene = scene();
        let mut rtx = RtContext::new(RenderConfig {
            width: 2,
            height: 2,
            max_bounces: 1,
            max_frames: 2,
            ..Default::default()
        });

        for _ in 0..4 {
            rtx.update_image(&scene);
        }
        assert!(rtx.is_converged());
        assert_eq!((rtx.current_frame, rtx.current_line), (2, 0));

        for _ in 0..3 {
            rtx.update_image(&scene);
        }
        assert_eq!((rtx.current_frame, rtx.current_line), (2, 0));
        // The stalled line keeps being rendered, the average is unchanged
        let resolved = rtx.resolved();
        let single = expected_color(&rtx, &scene, 0, 0);
        assert!((resolved[0] - single).length() < 1e-4);
        assert_eq!(rtx.image[2].w, 2.0);
    }

    #[test]
    fn test_reset_image() {
        let scene = scene();
        let mut rtx = context(2, 2);
        for _ in 0..3 {
            rtx.update_image(&scene);
        }
        rtx.freeze = true;
        rtx.config.width = 3;

        rtx.reset_image();
        assert_eq!(rtx.image.len(), 6);
        assert!(rtx.image.iter().all(|p| *p == Vec4::ZERO));
        assert_eq!((rtx.current_frame, rtx.current_line), (0, 0));
        assert!(!rtx.freeze);
    }

    #[test]
    fn test_update_resizes_buffer() {
        let scene = scene();
        let mut rtx = context(2, 2);
        rtx.config.width = 5;
        rtx.config.height = 3;

        rtx.update_image(&scene);
        assert_eq!(rtx.image.len(), 15);
        assert!(rtx.image[..5].iter().all(|p| p.w == 1.0));
    }

    #[test]
    fn test_out_of_range_line_is_ignored() {
        let scene = scene();
        let mut rtx = context(2, 2);

        rtx.update_line(&scene, 7);
        assert!(rtx.image.iter().all(|p| *p == Vec4::ZERO));
    }

    #[test]
    fn test_zero_sized_image_is_a_no_op() {
        let scene = scene();
        for (width, height) in [(0, 3), (3, 0), (0, 0)] {
            let mut rtx = context(width, height);
            rtx.update_image(&scene);
            rtx.update_line(&scene, 0);

            assert!(rtx.image.is_empty());
            assert_eq!((rtx.current_frame, rtx.current_line), (0, 0));
            assert!(rtx.to_rgba8().is_empty());
        }
    }

    #[test]
    fn test_to_rgba8_is_top_down() {
        let mut rtx = context(1, 2);
        rtx.image[0] = Vec4::new(0.0, 0.0, 0.0, 1.0); // bottom row
        rtx.image[1] = Vec4::new(2.0, 2.0, 2.0, 2.0); // top row

        assert_eq!(rtx.to_rgba8(), vec![255, 255, 255, 255, 0, 0, 0, 255]);
    }
}

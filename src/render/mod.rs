//! Camera, per-pixel evaluation and whole-frame rendering.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::marcher::march;
use crate::math::{v, v2, Ray, O, V2, V3};
use crate::scene::BounceScene;
use crate::shading::shade;
use image::{ImageBuffer, Pixel, Rgba};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Linear RGB, unclamped. Alpha is implicitly 1.
pub type Color = V3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub origin: V3,
    /// Distance of the image plane from the eye; larger is narrower.
    pub fov: f64,
    pub base_color: Color,
    /// Sub-samples per pixel along each axis.
    pub antialias: u32,
    /// Scale the horizontal coordinate by width / height.
    pub aspect_correct: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            origin: v(0., 0., -3.),
            fov: 1.,
            base_color: v(1., 1., 1.),
            antialias: 1,
            aspect_correct: false,
        }
    }
}

impl Camera {
    /// Maps a fragment coordinate to `[-0.5, 0.5]` per axis.
    pub fn normalize_coord(&self, coord: &V2, resolution: &V2) -> V2 {
        let mut st = v2(coord.x / resolution.x - 0.5, coord.y / resolution.y - 0.5);
        if self.aspect_correct {
            st.x *= resolution.x / resolution.y;
        }
        st
    }

    pub fn ray(&self, coord: &V2, resolution: &V2) -> Ray {
        let st = self.normalize_coord(coord, resolution);
        Ray::new(self.origin, v(st.x, st.y, self.fov))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    pub settings: Settings,
}

impl Renderer {
    pub fn new(settings: Settings) -> Renderer {
        Renderer { settings }
    }

    /// Color of one fragment of an already built frame.
    ///
    /// `coord` has its origin at the bottom-left corner of the output.
    pub fn shade_pixel(&self, scene: &BounceScene, coord: &V2, resolution: &V2) -> Color {
        let Settings {
            march: settings,
            lighting,
            camera,
        } = &self.settings;
        let ray = camera.ray(coord, resolution);
        let result = march(scene, &ray, settings);
        if result.is_hit(settings.max_distance) {
            let p = ray.at(result.distance);
            shade(scene, &p, &ray.d, &camera.base_color, lighting, settings)
        } else {
            O
        }
    }

    pub fn evaluate(&self, coord: &V2, resolution: &V2, elapsed_time: f64) -> Result<Color> {
        let scene = BounceScene::at_time(elapsed_time)?;
        Ok(self.shade_pixel(&scene, coord, resolution))
    }

    /// Averages an `antialias` x `antialias` grid of fragments inside image
    /// pixel `(x, y)`, where `y` counts rows from the top.
    fn render_pixel(&self, scene: &BounceScene, x: u32, y: u32, width: u32, height: u32) -> Color {
        let n = self.settings.camera.antialias.max(1);
        let resolution = v2(width as f64, height as f64);
        let row = (height - 1 - y) as f64;
        let subpixel_width = 1. / n as f64;
        let mut pix_sum = O;
        for x_jitter in 0..n {
            for y_jitter in 0..n {
                let coord = v2(
                    x as f64 + (x_jitter as f64 + 0.5) * subpixel_width,
                    row + (y_jitter as f64 + 0.5) * subpixel_width,
                );
                pix_sum = pix_sum + self.shade_pixel(scene, &coord, &resolution);
            }
        }
        (1.0 / (n * n) as f64) * pix_sum
    }

    /// Renders every pixel of one frame, row-major from the top-left.
    pub fn render_frame(&self, width: u32, height: u32, elapsed_time: f64) -> Result<Vec<Color>> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResolution { width, height });
        }
        let scene = BounceScene::at_time(elapsed_time)?;
        info!(
            "rendering {}x{} frame at t = {} (phase {:.4})",
            width,
            height,
            elapsed_time,
            scene.frame().phase
        );
        let start = Instant::now();
        let w = width as usize;
        let pixels: Vec<Color> = (0usize..(w * height as usize))
            .into_par_iter()
            .map(move |i| ((i % w) as u32, (i / w) as u32))
            .map(|(x, y)| self.render_pixel(&scene, x, y, width, height))
            .collect();
        debug!("frame took {} s", start.elapsed().as_secs_f32());
        Ok(pixels)
    }
}

/// Color of one fragment with the default settings.
pub fn evaluate(coord: &V2, resolution: &V2, elapsed_time: f64) -> Result<Color> {
    Renderer::default().evaluate(coord, resolution, elapsed_time)
}

fn to_channel(c: f64) -> u8 {
    (c.clamp(0., 1.) * 255.).round() as u8
}

/// Packs row-major colors into an RGBA8 image, clamping each channel.
pub fn to_image(pixels: &[Color], width: u32, height: u32) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if pixels.len() != width as usize * height as usize {
        return Err(Error::InvalidResolution { width, height });
    }
    let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let color = pixels[x as usize + y as usize * width as usize];
        let channels = p.channels_mut();
        channels[0] = to_channel(color.x);
        channels[1] = to_channel(color.y);
        channels[2] = to_channel(color.z);
        channels[3] = u8::MAX;
    }
    Ok(img)
}

pub fn save_png(pixels: &[Color], width: u32, height: u32, path: impl AsRef<Path>) -> Result<()> {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = to_image(pixels, width, height)?;
    img.save(path.as_ref())?;
    info!("wrote {}", path.as_ref().display());
    Ok(())
}

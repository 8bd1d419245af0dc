//! CPU frame rasterizer.
//!
//! Shades every pixel centre with the sky model, then draws the reference
//! overlays (altitude curve and horizon line) on top.

use std::path::Path;
use std::time::Instant;

use glam::Vec2;
use image::{Rgb as Pixel, RgbImage};
use rayon::prelude::*;

use crate::config::FrameConfig;
use crate::core::{Error, Result};
use crate::render::state::FrameInput;
use crate::sky::{SkyShader, to_rgb8};

/// Colour of the altitude curve and horizon overlays.
const OVERLAY_COLOR: Pixel<u8> = Pixel([128, 128, 128]);

/// NDC position of the centre of pixel `(px, py)`; y points up.
#[inline]
pub fn pixel_to_ndc(px: u32, py: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (px as f32 + 0.5) / width as f32 * 2.0 - 1.0,
        1.0 - (py as f32 + 0.5) / height as f32 * 2.0,
    )
}

/// Continuous pixel coordinates of an NDC point.
#[inline]
pub fn ndc_to_pixel(point: Vec2, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (point.x + 1.0) * 0.5 * width as f32,
        (1.0 - point.y) * 0.5 * height as f32,
    )
}

/// Render one frame of the sky for `input`.
///
/// Fails with [`Error::Config`] if either dimension is zero.
pub fn render_frame(input: &FrameInput, shader: &SkyShader, frame: &FrameConfig) -> Result<RgbImage> {
    let start = Instant::now();
    let (width, height) = (frame.width, frame.height);
    if width == 0 || height == 0 {
        return Err(Error::Config(format!("frame size {width}x{height} must be non-zero")));
    }
    let aspect_ratio = frame.aspect_ratio();
    let row_len = width as usize * 3;

    let mut buffer = vec![0u8; row_len * height as usize];
    buffer
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, pixel) in row.chunks_exact_mut(3).enumerate() {
                let point = pixel_to_ndc(px as u32, py as u32, width, height);
                pixel.copy_from_slice(&to_rgb8(shader.shade(point, input.sun, aspect_ratio)));
            }
        });

    let mut image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        Error::Image(image::ImageError::Parameter(
            image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ),
        ))
    })?;

    if frame.draw_altitude_curve {
        let points: Vec<Vec2> = input
            .curve
            .points()
            .iter()
            .map(|p| p.as_vec2())
            .collect();
        draw_polyline(&mut image, &points, OVERLAY_COLOR);
    }
    if frame.draw_horizon {
        draw_line(&mut image, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), OVERLAY_COLOR);
    }

    log::debug!(
        "Rendered {}x{} frame in {:.1}ms",
        width,
        height,
        start.elapsed().as_secs_f32() * 1000.0
    );
    Ok(image)
}

/// Write a frame as PNG (format chosen from the extension).
pub fn save_frame(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path.as_ref())?;
    Ok(())
}

/// Draw connected line segments through NDC points.
pub fn draw_polyline(image: &mut RgbImage, points: &[Vec2], color: Pixel<u8>) {
    for pair in points.windows(2) {
        draw_line(image, pair[0], pair[1], color);
    }
}

/// Draw a one-pixel line between two NDC points, clipped to the image.
pub fn draw_line(image: &mut RgbImage, a: Vec2, b: Vec2, color: Pixel<u8>) {
    let (width, height) = image.dimensions();
    let pa = ndc_to_pixel(a, width, height);
    let pb = ndc_to_pixel(b, width, height);

    let steps = (pb - pa).abs().max_element().ceil().max(1.0) as u32;
    for i in 0..=steps {
        let p = pa.lerp(pb, i as f32 / steps as f32);
        let (x, y) = (p.x.floor(), p.y.floor());
        if x >= 0.0 && y >= 0.0 && x < width as f32 && y < height as f32 {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

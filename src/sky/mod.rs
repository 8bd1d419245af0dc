//! Procedural sky shading model.
//!
//! Maps a sun position and a screen point to a colour. Four independent
//! terms are summed with fixed weights:
//!
//! ```text
//! background * fill + 0.8 * sky * sunlight + 0.4 * sun * disc + 0.3 * horizon * glow
//! ```
//!
//! The model is defined per point so that a GPU fragment shader and the CPU
//! code here produce the same image. Evaluation has no shared mutable
//! state; points can be shaded in any order and in parallel.

pub mod config;
pub mod horizon;
pub mod terms;
pub mod uniform;

// Re-exports
pub use config::{BlendWeights, SkyConfig, SkyPalette};
pub use horizon::{bell, horizon_glow, horizon_sun_elevation_scale, horizon_sunlight_scale};
pub use terms::{adjust_sunlight_radius, sun_fill, sun_scale, sunlight_scale};
pub use uniform::SkyUniform;

use glam::{Vec2, Vec3};

use crate::ephemeris::SunPosition;

/// A point in normalized device coordinates, `[-1, 1]` on both axes.
pub type ScreenPoint = Vec2;

/// Linear RGB colour. Components may exceed 1 near the sun.
pub type Rgb = Vec3;

// ---------------------------------------------------------------------------
// ShadeTerms
// ---------------------------------------------------------------------------

/// Unweighted value of every term at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeTerms {
    /// [`sun_fill`]
    pub fill: f32,
    /// [`sunlight_scale`]
    pub sunlight: f32,
    /// [`sun_scale`]
    pub disc: f32,
    /// [`horizon_glow`]
    pub horizon: f32,
    /// Sunrise or sunset colour, depending on which half the sun is in.
    pub horizon_color: Rgb,
}

// ---------------------------------------------------------------------------
// SkyShader
// ---------------------------------------------------------------------------

/// CPU evaluation of the sky model for a given configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkyShader {
    config: SkyConfig,
}

impl SkyShader {
    pub fn new(config: SkyConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    /// Evaluate each term at `point` (un-corrected NDC) for `sun`.
    pub fn terms(&self, point: ScreenPoint, sun: SunPosition, aspect_ratio: f32) -> ShadeTerms {
        let aspect = Vec2::new(aspect_ratio, 1.0);
        let corrected = point * aspect;
        let distance = corrected.distance(sun.as_vec2() * aspect);

        let radius = adjust_sunlight_radius(
            self.config.sunlight_radius,
            sun.y / self.config.altitude_scale,
        );

        let palette = &self.config.palette;
        let horizon_color = if sun.is_rising() {
            Vec3::from(palette.sunrise)
        } else {
            Vec3::from(palette.sunset)
        };

        ShadeTerms {
            fill: sun_fill(distance, corrected),
            sunlight: sunlight_scale(distance, radius, corrected),
            disc: sun_scale(distance, corrected),
            horizon: horizon_glow(point, sun.as_vec2(), self.config.horizon_radius / aspect_ratio),
            horizon_color,
        }
    }

    /// Colour at `point` (un-corrected NDC) for `sun` on a surface with the
    /// given width / height ratio.
    pub fn shade(&self, point: ScreenPoint, sun: SunPosition, aspect_ratio: f32) -> Rgb {
        let t = self.terms(point, sun, aspect_ratio);
        let palette = &self.config.palette;
        let w = &self.config.weights;

        Vec3::from(palette.background) * t.fill
            + w.sky * Vec3::from(palette.sky) * t.sunlight
            + w.sun * Vec3::from(palette.sunlight) * t.disc
            + w.horizon * t.horizon * t.horizon_color
    }
}

/// Shade one point with the default palette and weights.
pub fn shade(point: ScreenPoint, sun: SunPosition, aspect_ratio: f32, altitude_scale: f32) -> Rgb {
    let config = SkyConfig {
        altitude_scale,
        ..SkyConfig::default()
    };
    SkyShader::new(config).shade(point, sun, aspect_ratio)
}

/// Clamp a colour to the displayable `[0, 1]` range.
#[inline]
pub fn saturate(color: Rgb) -> Rgb {
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Convert a colour to 8-bit sRGB-range bytes after saturating.
#[inline]
pub fn to_rgb8(color: Rgb) -> [u8; 3] {
    let c = saturate(color) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sky::terms::{SUN_SCALE_CAP, SUNLIGHT_PEAK};

    fn approx_eq_3(a: Vec3, b: Vec3, eps: f32) -> bool {
        (a - b).abs().max_element() < eps
    }

    #[test]
    fn test_point_on_sun_is_brightest() {
        let sun = SunPosition::new(0.1, 0.5);
        let shader = SkyShader::default();
        let t = shader.terms(sun.as_vec2(), sun, 1.0);
        assert_eq!(t.disc, SUN_SCALE_CAP);
        assert_eq!(t.sunlight, SUNLIGHT_PEAK);
        assert_eq!(t.fill, 1.0);

        let at_sun = shade(sun.as_vec2(), sun, 1.0, 0.8);
        let beside = shade(Vec2::new(0.3, 0.5), sun, 1.0, 0.8);
        assert!(at_sun.x > beside.x && at_sun.y > beside.y && at_sun.z > beside.z);
        assert!(at_sun.is_finite());
    }

    #[test]
    fn test_midday_sky_is_blue() {
        let sun = SunPosition::new(0.0, 0.7);
        let color = shade(Vec2::new(0.0, 0.4), sun, 1.0, 0.8);
        assert!(color.z > color.x, "{color:?}");
        assert!(color.z > 0.3);
    }

    #[test]
    fn test_night_sky_is_background() {
        // Well past astronomical twilight: no sunlight, only the faint tail of the disc glow
        let sun = SunPosition::new(0.95, -0.6);
        let shader = SkyShader::default();
        for point in [Vec2::new(0.0, 0.5), Vec2::new(0.9, 0.1), Vec2::new(-0.5, -0.5)] {
            assert_eq!(shader.terms(point, sun, 1.0).sunlight, 0.0);
            let color = shade(point, sun, 1.0, 0.8);
            assert!(approx_eq_3(color, Vec3::ZERO, 0.01), "{point:?}: {color:?}");
        }
    }

    #[test]
    fn test_below_horizon_sun_rim() {
        let sun = SunPosition::new(0.2, -0.1);
        let shader = SkyShader::default();

        let inside = shader.terms(Vec2::new(0.2, -0.09), sun, 1.0);
        assert_eq!(inside.fill, 0.0);
        assert_eq!(inside.disc, 0.0);

        let rim = shader.terms(Vec2::new(0.2, -0.1375), sun, 1.0);
        assert_eq!(rim.disc, 1.0);
        assert_eq!(rim.sunlight, 0.0);
    }

    #[test]
    fn test_horizon_colour_follows_sun_side() {
        let shader = SkyShader::default();
        let palette = shader.config().palette;

        let rising = shader.terms(Vec2::new(-0.5, 0.05), SunPosition::new(-0.5, 0.0), 1.0);
        assert_eq!(rising.horizon_color, Vec3::from(palette.sunrise));
        assert!(rising.horizon > 0.0);

        let setting = shader.terms(Vec2::new(0.5, 0.05), SunPosition::new(0.5, 0.0), 1.0);
        assert_eq!(setting.horizon_color, Vec3::from(palette.sunset));

        let color = shader.shade(Vec2::new(0.5, 0.05), SunPosition::new(0.5, 0.0), 1.0);
        // Sunset glow pushes red above blue
        assert!(color.x > color.z, "{color:?}");
    }

    #[test]
    fn test_aspect_ratio_stretches_distance() {
        let sun = SunPosition::new(0.0, 0.5);
        let shader = SkyShader::default();
        let point = Vec2::new(0.3, 0.5);
        let square = shader.terms(point, sun, 1.0);
        let wide = shader.terms(point, sun, 2.0);
        assert!(wide.sunlight < square.sunlight);
        assert!(wide.disc < square.disc);
    }

    #[test]
    fn test_custom_weights() {
        let config = SkyConfig {
            weights: BlendWeights {
                sky: 0.0,
                sun: 0.0,
                horizon: 0.0,
            },
            palette: SkyPalette {
                background: [0.1, 0.2, 0.3],
                ..SkyPalette::default()
            },
            ..SkyConfig::default()
        };
        let color = SkyShader::new(config).shade(Vec2::new(0.0, 0.3), SunPosition::new(0.0, 0.5), 1.0);
        assert!(approx_eq_3(color, Vec3::new(0.1, 0.2, 0.3), 1e-6));
    }

    #[test]
    fn test_to_rgb8_saturates() {
        assert_eq!(to_rgb8(Vec3::new(2.0, -1.0, 0.5)), [255, 0, 128]);
        assert_eq!(saturate(Vec3::splat(3.0)), Vec3::ONE);
    }
}

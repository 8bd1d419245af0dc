//! Horizon glow band for sunrise and sunset.
//!
//! The band is drawn around a bell-shaped ridge centred under the sun whose
//! height follows the sun's elevation. There is no closed form for the
//! distance from a point to that ridge, so it is found by brute force over
//! a fixed set of ridge samples.
//!
//! Unlike the disc terms, the glow works in un-corrected screen space.

use glam::Vec2;

/// Width parameter `b` of the ridge: `c * e^(-x^2 / b) - 0.04`.
pub const RIDGE_WIDTH: f32 = 0.01;

/// Constant drop applied to the ridge so it starts below the horizon.
pub const RIDGE_DROP: f32 = 0.04;

/// Ridge samples on each side of x = 0; 201 samples in total.
pub const RIDGE_HALF_SAMPLES: i32 = 100;

/// Spacing between ridge samples.
pub const RIDGE_STEP: f32 = 1.0 / RIDGE_HALF_SAMPLES as f32;

/// Nearest-ridge distances are never reported above this.
pub const MAX_RIDGE_DISTANCE: f32 = 0.2;

/// Intensity envelope of the band as a function of the sun's height.
///
/// Rises quadratically from `sun_y = -0.3`, peaks near the horizon and
/// fades out by `sun_y = 0.15`. Zero for a sun well below or well above
/// the horizon.
pub fn horizon_sun_elevation_scale(sun_y: f32) -> f32 {
    if sun_y > -0.3 && sun_y <= 0.025 {
        0.15 * (sun_y + 0.3).powi(2)
    } else if sun_y > 0.025 && sun_y < 0.15 {
        0.8 * (sun_y - 0.1705).powi(2)
    } else {
        0.0
    }
}

/// Height of the glow ridge at horizontal offset `x` from the sun.
#[inline]
pub fn bell(x: f32, width: f32, peak: f32) -> f32 {
    peak * (-(x * x) / width).exp() - RIDGE_DROP
}

/// Angular taper of the band away from the sun.
///
/// Same shape as the sky sunlight term with a narrower core and peak 1.
pub fn horizon_sunlight_scale(distance: f32, radius: f32, point: Vec2) -> f32 {
    if point.y < 0.0 {
        return 0.0;
    }

    let ratio = distance / radius;
    if ratio < 0.01 {
        1.0
    } else if ratio < 0.9 {
        0.5 * (3.9 * ratio - 0.2).cos() + 0.5
    } else {
        0.0
    }
}

/// Shortest distance from `point` to the ridge under a sun at `sun_x`,
/// sampled at x = -1, -0.99, ..., 1 and capped at [`MAX_RIDGE_DISTANCE`].
pub fn ridge_distance(point: Vec2, sun_x: f32, peak: f32) -> f32 {
    (-RIDGE_HALF_SAMPLES..=RIDGE_HALF_SAMPLES)
        .map(|i| {
            let x = i as f32 * RIDGE_STEP;
            point.distance(Vec2::new(x, bell(x - sun_x, RIDGE_WIDTH, peak)))
        })
        .fold(MAX_RIDGE_DISTANCE, f32::min)
}

/// Glow intensity of the horizon band at `point` for a sun at `sun`.
///
/// `radius` is the angular falloff radius of the band. Points below the
/// horizon and points under the ridge get nothing.
pub fn horizon_glow(point: Vec2, sun: Vec2, radius: f32) -> f32 {
    if point.y < 0.0 {
        return 0.0;
    }

    let peak = horizon_sun_elevation_scale(sun.y);
    if point.y <= bell(point.x - sun.x, RIDGE_WIDTH, peak) {
        return 0.0;
    }

    let distance = ridge_distance(point, sun.x, peak);
    (peak / (distance * distance)) * horizon_sunlight_scale(point.distance(sun), radius, point)
}

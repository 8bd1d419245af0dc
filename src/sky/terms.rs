//! Sun disc and sunlight falloff terms.
//!
//! All distances are measured in aspect-corrected screen space. A point is
//! "below the horizon" when its y is negative.

use glam::Vec2;

/// Radius of the sun disc cut out of the background below the horizon.
pub const SUN_DISC_RADIUS: f32 = 0.035;

/// Outer edge of the rim drawn around a sun that has set.
pub const SUN_RIM_OUTER: f32 = 0.04;

/// Numerator of the inverse-square disc glow.
pub const SUN_GLOW_STRENGTH: f32 = 0.003;

/// Upper bound on the disc glow so the sun's own centre stays finite.
pub const SUN_SCALE_CAP: f32 = 1000.0;

/// Sky brightness inside the sunlight core.
pub const SUNLIGHT_PEAK: f32 = 0.6;

/// Fraction of the sunlight radius that is fully lit.
pub const SUNLIGHT_CORE: f32 = 0.08;

/// Fraction of the sunlight radius beyond which there is no sunlight.
pub const SUNLIGHT_EDGE: f32 = 0.9;

/// sin(18 degrees): below -this the sun is past astronomical twilight.
pub const NIGHT_CUTOFF_SIN_ALTITUDE: f32 = 0.309_016_99;

/// Background multiplier: 0 inside the sun disc below the horizon, 1 elsewhere.
#[inline]
pub fn sun_fill(distance: f32, point: Vec2) -> f32 {
    if point.y < 0.0 && distance <= SUN_DISC_RADIUS {
        0.0
    } else {
        1.0
    }
}

/// Sky glow around the sun, in `[0, 0.6]`.
///
/// Full strength within 8% of `radius`, a cosine taper out to 90%, nothing
/// beyond and nothing below the horizon. A zero radius gives zero.
pub fn sunlight_scale(distance: f32, radius: f32, point: Vec2) -> f32 {
    if point.y < 0.0 {
        return 0.0;
    }

    // A NaN ratio (0/0) fails both comparisons and lands on zero
    let ratio = distance / radius;
    if ratio < SUNLIGHT_CORE {
        SUNLIGHT_PEAK
    } else if ratio < SUNLIGHT_EDGE {
        SUNLIGHT_PEAK * (0.5 * (3.9 * ratio - 0.39).cos() + 0.5)
    } else {
        0.0
    }
}

/// Brightness of the sun disc itself.
///
/// Above the horizon an inverse-square glow capped at [`SUN_SCALE_CAP`].
/// Below the horizon only a thin rim between [`SUN_DISC_RADIUS`] and
/// [`SUN_RIM_OUTER`] is lit.
pub fn sun_scale(distance: f32, point: Vec2) -> f32 {
    if point.y >= 0.0 {
        (SUN_GLOW_STRENGTH / (distance * distance)).min(SUN_SCALE_CAP)
    } else if (SUN_DISC_RADIUS..=SUN_RIM_OUTER).contains(&distance) {
        1.0
    } else {
        0.0
    }
}

/// Shrink the sunlight radius as the sun sinks through twilight.
///
/// Unchanged while `sin_altitude >= 0`, zero at or below
/// `-NIGHT_CUTOFF_SIN_ALTITUDE`, linear in between.
pub fn adjust_sunlight_radius(default_radius: f32, sin_altitude: f32) -> f32 {
    if sin_altitude >= 0.0 {
        default_radius
    } else if sin_altitude <= -NIGHT_CUTOFF_SIN_ALTITUDE {
        0.0
    } else {
        default_radius * (1.0 + sin_altitude / NIGHT_CUTOFF_SIN_ALTITUDE)
    }
}

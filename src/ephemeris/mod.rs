//! Solar ephemeris calculator.
//!
//! Turns a calendar date and an observer location into the sun's position
//! on a normalized 2D sky: x follows the hour angle (-180..180 degrees maps
//! to -1..1) and y is the scaled sine of the solar altitude. Everything here
//! is a pure function of its inputs except [`AltitudeCurveCache`].

pub mod curve;
pub mod date;
pub mod solar;

// Re-exports
pub use curve::{AltitudeCurve, AltitudeCurveCache, CURVE_STEP, altitude_curve};
pub use date::{DayOfYear, GeoDate, Location, days_in_month, is_leap_year};
pub use solar::{
    altitude, declination, equation_of_time, hour_angle, solar_noon_offset_minutes,
    wrap_hour_angle,
};

use glam::Vec2;

// ---------------------------------------------------------------------------
// SunPosition
// ---------------------------------------------------------------------------

/// Sun position on the normalized sky.
///
/// `x` is the wrapped hour angle divided by 180 degrees and always lies in
/// `[-1, 1]`. `y` is `altitude_scale * sin(altitude)` and is not clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SunPosition {
    pub x: f32,
    pub y: f32,
}

impl SunPosition {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position for a bounded hour angle in degrees (`[-180, 180]`).
    pub fn from_hour_angle(
        hour_angle_degrees: f64,
        day_of_year: f64,
        latitude_radians: f64,
        altitude_scale: f64,
    ) -> Self {
        let y = altitude(
            day_of_year,
            latitude_radians,
            hour_angle_degrees.to_radians(),
            altitude_scale,
        );
        Self {
            x: (hour_angle_degrees / 180.0) as f32,
            y: y as f32,
        }
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Hour angle in degrees this position encodes.
    #[inline]
    pub fn hour_angle_degrees(&self) -> f64 {
        f64::from(self.x) * 180.0
    }

    #[inline]
    pub fn is_above_horizon(&self) -> bool {
        self.y >= 0.0
    }

    /// Whether the sun is in the morning half of the sky.
    #[inline]
    pub fn is_rising(&self) -> bool {
        self.x < 0.0
    }
}

impl From<SunPosition> for Vec2 {
    fn from(sun: SunPosition) -> Self {
        sun.as_vec2()
    }
}

/// Sun position for `date` seen from the given latitude and longitude.
///
/// The hour angle is wrapped into `[-180, 180)` before mapping to x.
pub fn compute_sun_position(
    date: &GeoDate,
    latitude_degrees: f64,
    longitude_degrees: f64,
    altitude_scale: f64,
) -> SunPosition {
    let wrapped = wrap_hour_angle(hour_angle(date, longitude_degrees));
    SunPosition::from_hour_angle(
        wrapped,
        f64::from(date.day_of_year()),
        latitude_degrees.to_radians(),
        altitude_scale,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

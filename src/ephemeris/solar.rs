//! Solar ephemeris approximations.
//!
//! Low-precision formulas for declination, the equation of time and the
//! hour angle, good to a fraction of a degree. That is plenty for driving a
//! sky colour model, and every function here is total: out-of-range input
//! gives a meaningless but finite (or NaN) answer instead of an error.

use crate::ephemeris::date::GeoDate;

/// Mean length of the tropical year in days, as used by the analemma terms.
pub const DAYS_PER_YEAR: f64 = 365.24;

/// Obliquity of the ecliptic in degrees.
pub const AXIAL_TILT_DEG: f64 = 23.44;

/// sin of the axial tilt, the peak of sin(declination).
const SIN_AXIAL_TILT: f64 = 0.39795;

/// Degrees the sun advances along the declination cycle per day.
const DECLINATION_DEG_PER_DAY: f64 = 0.98563;

/// Day of year on which the declination peaks (June solstice).
const DECLINATION_PEAK_DAY: f64 = 173.0;

/// Minutes in half a day; maps 180 degrees of longitude or hour angle.
const HALF_DAY_MINUTES: f64 = 720.0;

/// Seconds from local midnight to clock noon.
const NOON_SECONDS: f64 = 12.0 * 3600.0;

/// Sun declination in radians for a (possibly fractional) day of year.
pub fn declination(day_of_year: f64) -> f64 {
    let angle = (DECLINATION_DEG_PER_DAY * (day_of_year - DECLINATION_PEAK_DAY)).to_radians();
    (SIN_AXIAL_TILT * angle.cos()).asin()
}

/// Equation of time in minutes: how far the sundial runs ahead of the clock.
///
/// Wrapped into `(-360, 360]` with `C - floor(C + 0.5)`, which picks the
/// nearest whole number of half-turns for negative `C` as well.
pub fn equation_of_time(day_of_year: f64) -> f64 {
    let deg_per_day = 360.0 / DAYS_PER_YEAR;
    let orbital_angle = deg_per_day * (day_of_year + 10.0);
    let corrected_angle =
        orbital_angle + 1.914 * (deg_per_day.to_radians() * (day_of_year - 2.0)).sin();

    let projected = (corrected_angle.to_radians().tan() / AXIAL_TILT_DEG.to_radians().cos())
        .atan()
        .to_degrees();
    let c = (orbital_angle - projected) / 180.0;

    HALF_DAY_MINUTES * (c - (c + 0.5).floor())
}

/// Minutes solar time runs ahead of UTC because of longitude alone.
#[inline]
pub fn longitude_offset_minutes(longitude_degrees: f64) -> f64 {
    longitude_degrees / 180.0 * HALF_DAY_MINUTES
}

/// Minutes from local clock noon to local solar noon on `date`.
///
/// Combines the equation of time, the longitude offset and the date's own
/// UTC offset.
pub fn solar_noon_offset_minutes(date: &GeoDate, longitude_degrees: f64) -> f64 {
    let eot = equation_of_time(f64::from(date.day_of_year()));
    -(eot + longitude_offset_minutes(longitude_degrees) - f64::from(date.utc_offset_minutes()))
}

/// Hour angle in degrees at `date` for an observer at `longitude_degrees`.
///
/// Zero at solar noon, positive in the afternoon, 15 degrees per hour.
/// Unbounded; see [`wrap_hour_angle`].
pub fn hour_angle(date: &GeoDate, longitude_degrees: f64) -> f64 {
    let solar_noon = NOON_SECONDS + solar_noon_offset_minutes(date, longitude_degrees) * 60.0;
    let seconds_since_noon = f64::from(date.seconds_of_day()) - solar_noon;
    180.0 * seconds_since_noon / (HALF_DAY_MINUTES * 60.0)
}

/// Wrap an hour angle in degrees into `[-180, 180)`.
#[inline]
pub fn wrap_hour_angle(hour_angle_degrees: f64) -> f64 {
    (hour_angle_degrees + 540.0).rem_euclid(360.0) - 180.0
}

/// Sine of the solar altitude multiplied by `altitude_scale`.
///
/// Not the altitude angle: the scale compresses the visual range so the
/// sun never quite reaches the top of the screen.
pub fn altitude(
    day_of_year: f64,
    latitude_radians: f64,
    hour_angle_radians: f64,
    altitude_scale: f64,
) -> f64 {
    let decl = declination(day_of_year);
    altitude_scale
        * (decl.sin() * latitude_radians.sin()
            + decl.cos() * latitude_radians.cos() * hour_angle_radians.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_declination_bounds() {
        for day in 1..=366 {
            let d = declination(f64::from(day));
            assert!(
                (-0.41..=0.41).contains(&d),
                "declination({day}) = {d} outside +-0.41"
            );
        }
    }

    #[test]
    fn test_declination_solstices() {
        assert!(approx_eq(declination(172.0), 0.41, 0.005));
        assert!(approx_eq(declination(355.0), -0.41, 0.005));
        assert!(approx_eq(declination(173.0), SIN_AXIAL_TILT.asin(), 1e-12));
    }

    #[test]
    fn test_declination_symmetric_around_solstice() {
        for offset in [10.0, 45.0, 90.0] {
            let before = declination(173.0 - offset);
            let after = declination(173.0 + offset);
            assert!(approx_eq(before, after, 1e-12), "offset {offset}: {before} vs {after}");
        }
    }

    #[test]
    fn test_equation_of_time_bounded() {
        for day in 1..=366 {
            let eot = equation_of_time(f64::from(day));
            assert!(eot.abs() < 20.0, "equation_of_time({day}) = {eot}");
        }
    }

    #[test]
    fn test_equation_of_time_periodic() {
        for day in [1.0, 45.5, 120.0, 200.25, 300.0] {
            let a = equation_of_time(day);
            let b = equation_of_time(day + DAYS_PER_YEAR);
            assert!(approx_eq(a, b, 1e-6), "day {day}: {a} vs {b}");
        }
    }

    #[test]
    fn test_equation_of_time_known_extremes() {
        // Sundial runs ~16 minutes fast in early November, ~14 slow in mid February
        assert!(equation_of_time(307.0) > 15.0);
        assert!(equation_of_time(45.0) < -13.0);
    }

    #[test]
    fn test_wrap_hour_angle() {
        assert!(approx_eq(wrap_hour_angle(0.0), 0.0, 1e-12));
        assert!(approx_eq(wrap_hour_angle(190.0), -170.0, 1e-12));
        assert!(approx_eq(wrap_hour_angle(-190.0), 170.0, 1e-12));
        assert!(approx_eq(wrap_hour_angle(725.0), 5.0, 1e-9));
        assert!(approx_eq(wrap_hour_angle(180.0), -180.0, 1e-12));
    }

    #[test]
    fn test_hour_angle_at_solar_noon_is_zero() {
        let date = GeoDate::utc(2024, 6, 21, 12, 0, 0).unwrap();
        let noon_offset = solar_noon_offset_minutes(&date, -0.1);
        // At 12:00 UTC in London solar noon is a couple of minutes away
        assert!(noon_offset.abs() < 5.0, "noon offset {noon_offset}");
        let h = hour_angle(&date, -0.1);
        assert!(approx_eq(h, -noon_offset / 4.0, 1e-9));
    }

    #[test]
    fn test_hour_angle_advances_fifteen_degrees_per_hour() {
        let morning = GeoDate::utc(2024, 3, 20, 9, 0, 0).unwrap();
        let afternoon = GeoDate::utc(2024, 3, 20, 15, 0, 0).unwrap();
        let diff = hour_angle(&afternoon, 0.0) - hour_angle(&morning, 0.0);
        assert!(approx_eq(diff, 90.0, 1e-9));
    }

    #[test]
    fn test_hour_angle_respects_utc_offset() {
        // 13:00 at UTC+1 is the same instant as 12:00 UTC
        let local = GeoDate::new(2024, 3, 20, 13, 0, 0, 60).unwrap();
        let utc = GeoDate::utc(2024, 3, 20, 12, 0, 0).unwrap();
        assert!(approx_eq(hour_angle(&local, 15.0), hour_angle(&utc, 15.0), 1e-9));
    }

    #[test]
    fn test_hour_angle_east_is_later() {
        let date = GeoDate::utc(2024, 3, 20, 12, 0, 0).unwrap();
        // 15 degrees east is one hour further past noon
        let diff = hour_angle(&date, 15.0) - hour_angle(&date, 0.0);
        assert!(approx_eq(diff, 15.0, 1e-9));
    }

    #[test]
    fn test_altitude_equator_equinox() {
        let decl = declination(80.0);
        assert!(decl.abs() < 0.02);
        // Noon on the equator: the sun is nearly overhead
        assert!(approx_eq(altitude(80.0, 0.0, 0.0, 1.0), decl.cos(), 1e-12));
        assert!(altitude(80.0, 0.0, 0.0, 1.0) > 0.999);
        // Six hours later it sits on the horizon
        assert!(altitude(80.0, 0.0, FRAC_PI_2, 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_altitude_scale_is_linear() {
        let lat = 51.5_f64.to_radians();
        let full = altitude(173.0, lat, 0.3, 1.0);
        let scaled = altitude(173.0, lat, 0.3, 0.8);
        assert!(approx_eq(scaled, 0.8 * full, 1e-12));
    }

    #[test]
    fn test_altitude_midnight_below_horizon_in_winter() {
        let lat = 51.5_f64.to_radians();
        assert!(altitude(355.0, lat, PI, 1.0) < -0.5);
    }
}

//! Sampled sine-altitude profile of the sun over one day.
//!
//! The curve maps screen x in `[-1, 1]` (hour angle -180..180 degrees) to the
//! scaled sine-altitude. It only depends on the day of year and latitude, so
//! [`AltitudeCurveCache`] keeps the last one around until either changes.

use std::f64::consts::PI;
use std::sync::Arc;

use glam::DVec2;

use crate::ephemeris::date::DayOfYear;
use crate::ephemeris::solar::altitude;

/// Default spacing between curve samples in screen units.
pub const CURVE_STEP: f64 = 0.01;

/// Slack when counting how many steps fit between -1 and 1.
const GRID_TOLERANCE: f64 = 1e-9;

/// Altitude samples at a fixed x-step over `[-1, 1]`, inclusive at both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct AltitudeCurve {
    step: f64,
    points: Vec<DVec2>,
}

impl AltitudeCurve {
    /// Sample points in order of increasing x.
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Linearly interpolated altitude at screen x, `None` outside the sampled range.
    pub fn altitude_at(&self, x: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if !(first.x..=last.x).contains(&x) {
            return None;
        }

        let idx = (((x - first.x) / self.step).floor() as usize).min(self.points.len() - 1);
        let a = self.points[idx];
        let Some(&b) = self.points.get(idx + 1) else {
            return Some(a.y);
        };
        let t = (x - a.x) / (b.x - a.x);
        Some(a.y + (b.y - a.y) * t)
    }
}

/// Sample [`altitude`] for x from -1 to 1 inclusive at `step` increments,
/// using hour angle `x * PI`.
///
/// Sample positions are computed from an integer index. When `step`
/// divides 2 the last sample lands on exactly 1.0; otherwise the curve
/// stops at the last grid point below 1. A non-positive or non-finite step
/// yields an empty curve.
pub fn altitude_curve(
    day_of_year: f64,
    latitude_radians: f64,
    altitude_scale: f64,
    step: f64,
) -> AltitudeCurve {
    if !(step > 0.0 && step.is_finite()) {
        return AltitudeCurve { step, points: Vec::new() };
    }

    // Only whole steps that fit in [-1, 1]; the tolerance keeps 1.0 for
    // steps like 0.01 whose quotient rounds just below an integer
    let intervals = (2.0 / step + GRID_TOLERANCE).floor() as usize;
    let points = (0..=intervals)
        .map(|i| {
            let x = (-1.0 + i as f64 * step).min(1.0);
            DVec2::new(x, altitude(day_of_year, latitude_radians, x * PI, altitude_scale))
        })
        .collect();

    AltitudeCurve { step, points }
}

/// Identifies the inputs a cached curve was sampled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CurveKey {
    day_of_year: DayOfYear,
    /// Bit pattern so that the key compares exactly, NaN included.
    latitude_bits: u64,
}

impl CurveKey {
    fn new(day_of_year: DayOfYear, latitude_degrees: f64) -> Self {
        Self {
            day_of_year,
            latitude_bits: latitude_degrees.to_bits(),
        }
    }
}

/// Memoizes the most recent [`AltitudeCurve`] by `(day_of_year, latitude)`.
///
/// A request with the same key as the previous one returns the same shared
/// curve; any other key resamples and replaces it.
#[derive(Debug)]
pub struct AltitudeCurveCache {
    altitude_scale: f64,
    step: f64,
    entry: Option<(CurveKey, Arc<AltitudeCurve>)>,
    recompute_count: u64,
}

impl AltitudeCurveCache {
    /// Create an empty cache producing curves with the given altitude scale.
    pub fn new(altitude_scale: f64) -> Self {
        Self::with_step(altitude_scale, CURVE_STEP)
    }

    /// Create an empty cache with a custom sample step.
    pub fn with_step(altitude_scale: f64, step: f64) -> Self {
        Self {
            altitude_scale,
            step,
            entry: None,
            recompute_count: 0,
        }
    }

    /// Curve for the given day and latitude, resampled only if the key changed.
    pub fn get(&mut self, day_of_year: DayOfYear, latitude_degrees: f64) -> Arc<AltitudeCurve> {
        let key = CurveKey::new(day_of_year, latitude_degrees);

        if let Some((cached_key, curve)) = &self.entry {
            if *cached_key == key {
                log::trace!("Altitude curve cache hit (day {day_of_year}, lat {latitude_degrees})");
                return Arc::clone(curve);
            }
        }

        log::debug!(
            "Sampling altitude curve for day {} at latitude {:.4}",
            day_of_year,
            latitude_degrees
        );
        let curve = Arc::new(altitude_curve(
            f64::from(day_of_year),
            latitude_degrees.to_radians(),
            self.altitude_scale,
            self.step,
        ));
        self.recompute_count += 1;
        self.entry = Some((key, Arc::clone(&curve)));
        curve
    }

    /// Drop the cached curve so the next request resamples.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times a curve has been sampled.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    #[inline]
    pub fn altitude_scale(&self) -> f64 {
        self.altitude_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_sample_count_and_range() {
        let curve = altitude_curve(173.0, 51.5_f64.to_radians(), 0.8, CURVE_STEP);
        assert_eq!(curve.len(), 201);
        assert_eq!(curve.points()[0].x, -1.0);
        assert_eq!(curve.points()[200].x, 1.0);
        assert!((curve.points()[100].x).abs() < 1e-12);
    }

    #[test]
    fn test_curve_matches_altitude() {
        let lat = 30.0_f64.to_radians();
        let curve = altitude_curve(100.0, lat, 0.8, CURVE_STEP);
        for p in curve.points() {
            let expected = altitude(100.0, lat, p.x * PI, 0.8);
            assert!((p.y - expected).abs() < 1e-12);
        }
        // Peak at solar noon
        let peak = curve
            .points()
            .iter()
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .unwrap();
        assert!(peak.x.abs() < 1e-9);
    }

    #[test]
    fn test_curve_stays_on_grid() {
        let curve = altitude_curve(173.0, 0.0, 0.8, 0.8);
        let xs: Vec<f64> = curve.points().iter().map(|p| p.x).collect();
        assert_eq!(xs.len(), 3);
        for (i, x) in xs.iter().enumerate() {
            assert!((x - (-1.0 + i as f64 * 0.8)).abs() < 1e-12, "{xs:?}");
        }

        let quarter = altitude_curve(173.0, 0.0, 0.8, 0.25);
        assert_eq!(quarter.len(), 9);
        assert_eq!(quarter.points()[8].x, 1.0);

        // Wider than the whole range: only the starting point
        assert_eq!(altitude_curve(173.0, 0.0, 0.8, 3.0).len(), 1);
    }

    #[test]
    fn test_curve_bad_step_is_empty() {
        assert!(altitude_curve(1.0, 0.0, 0.8, 0.0).is_empty());
        assert!(altitude_curve(1.0, 0.0, 0.8, -0.1).is_empty());
        assert!(altitude_curve(1.0, 0.0, 0.8, f64::NAN).is_empty());
    }

    #[test]
    fn test_altitude_at_interpolates() {
        let lat = 51.5_f64.to_radians();
        let curve = altitude_curve(173.0, lat, 0.8, CURVE_STEP);

        let at_sample = curve.altitude_at(0.0).unwrap();
        assert!((at_sample - altitude(173.0, lat, 0.0, 0.8)).abs() < 1e-9);

        let between = curve.altitude_at(0.255).unwrap();
        let exact = altitude(173.0, lat, 0.255 * PI, 0.8);
        assert!((between - exact).abs() < 1e-3);

        assert!(curve.altitude_at(1.0).is_some());
        assert!(curve.altitude_at(1.5).is_none());
        assert!(curve.altitude_at(-1.01).is_none());
    }

    #[test]
    fn test_cache_returns_same_curve_for_same_key() {
        let mut cache = AltitudeCurveCache::new(0.8);
        let a = cache.get(173, 51.5);
        let b = cache.get(173, 51.5);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
        assert_eq!(cache.recompute_count(), 1);
    }

    #[test]
    fn test_cache_recomputes_on_key_change() {
        let mut cache = AltitudeCurveCache::new(0.8);
        let a = cache.get(173, 51.5);
        let b = cache.get(174, 51.5);
        let c = cache.get(174, 40.0);
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&b, &c));
        assert_eq!(cache.recompute_count(), 3);

        // Going back to an old key resamples, only the latest curve is kept
        let d = cache.get(173, 51.5);
        assert_eq!(*a, *d);
        assert_eq!(cache.recompute_count(), 4);
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = AltitudeCurveCache::new(0.8);
        cache.get(10, 0.0);
        cache.invalidate();
        cache.get(10, 0.0);
        assert_eq!(cache.recompute_count(), 2);
    }
}

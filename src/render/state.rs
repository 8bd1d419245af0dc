//! Render state carried between frames.
//!
//! Holds everything that persists from one frame to the next: the observer,
//! the cached altitude curve, the sun sweep and the current sun position.
//! Each frame reads an immutable [`FrameInput`] snapshot from it; nothing
//! changes while a frame is being shaded.

use std::sync::Arc;

use crate::core::Result;
use crate::ephemeris::{
    AltitudeCurve, AltitudeCurveCache, DayOfYear, GeoDate, Location, SunPosition,
    compute_sun_position, hour_angle,
};
use crate::render::animation::SunSweep;

// ---------------------------------------------------------------------------
// Inputs and snapshots
// ---------------------------------------------------------------------------

/// Direct control of the sun, bypassing the clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManualInput {
    /// Degrees from midnight, `[0, 360]`; 180 is solar noon.
    pub position_degrees: f64,
    pub latitude_degrees: f64,
    pub day_of_year: DayOfYear,
}

/// Immutable inputs for one frame.
#[derive(Clone, Debug)]
pub struct FrameInput {
    pub sun: SunPosition,
    pub curve: Arc<AltitudeCurve>,
    pub day_of_year: DayOfYear,
    pub latitude_degrees: f64,
}

// ---------------------------------------------------------------------------
// RenderState
// ---------------------------------------------------------------------------

/// Mutable state of the sky renderer. Call one of the update methods, then
/// [`snapshot`](Self::snapshot) once per frame.
#[derive(Debug)]
pub struct RenderState {
    location: Location,
    altitude_scale: f64,
    curves: AltitudeCurveCache,
    /// Date the sun position was last computed for.
    date: Option<GeoDate>,
    day_of_year: DayOfYear,
    sweep: Option<SunSweep>,
    sun: SunPosition,
}

impl RenderState {
    /// Create a state for an observer; the sun starts at midnight on January 1st.
    pub fn new(location: Location, altitude_scale: f64) -> Self {
        let day_of_year = 1;
        let sun = SunPosition::from_hour_angle(
            -180.0,
            f64::from(day_of_year),
            location.latitude_radians(),
            altitude_scale,
        );
        Self {
            location,
            altitude_scale,
            curves: AltitudeCurveCache::new(altitude_scale),
            date: None,
            day_of_year,
            sweep: None,
            sun,
        }
    }

    /// Place the sun at its true position for `date`, cancelling any sweep.
    pub fn set_date(&mut self, date: GeoDate) {
        self.sweep = None;
        self.date = Some(date);
        self.day_of_year = date.day_of_year();
        self.sun = self.true_position(&date);
    }

    /// Start a sweep from midnight up to the sun's position at `date`.
    pub fn start_sweep(&mut self, date: GeoDate) {
        let target = hour_angle(&date, self.location.longitude_degrees());
        let sweep = SunSweep::new(target);
        log::info!(
            "Starting sun sweep to hour angle {:.2} deg (day {}, {:02}:{:02})",
            sweep.limit() - 180.0,
            date.day_of_year(),
            date.hour(),
            date.minute()
        );

        self.date = Some(date);
        self.day_of_year = date.day_of_year();
        self.sun = self.sweep_position(&sweep);
        self.sweep = Some(sweep);
    }

    /// Extend the current sweep towards the sun's position at a later `date`.
    ///
    /// Starts a fresh sweep if none has been run.
    pub fn refresh(&mut self, date: GeoDate) {
        let Some(mut sweep) = self.sweep else {
            self.start_sweep(date);
            return;
        };
        sweep.retarget(hour_angle(&date, self.location.longitude_degrees()));
        self.date = Some(date);
        self.day_of_year = date.day_of_year();
        self.sweep = Some(sweep);
        if sweep.is_finished() {
            self.sun = self.true_position(&date);
        }
    }

    /// Advance the sweep by one tick. Returns `false` when nothing is animating.
    ///
    /// When the sweep ends the sun snaps to its true position for the date.
    pub fn advance(&mut self) -> bool {
        let Some(mut sweep) = self.sweep.filter(|s| !s.is_finished()) else {
            return false;
        };

        let running = sweep.advance();
        self.sweep = Some(sweep);
        if running {
            self.sun = self.sweep_position(&sweep);
        } else {
            log::info!("Sun sweep finished after {} steps", sweep.steps());
            if let Some(date) = self.date {
                self.sun = self.true_position(&date);
            }
        }
        running
    }

    /// Drive the sun directly from slider-style controls.
    ///
    /// Fails if the latitude is outside `[-90, 90]`.
    pub fn apply_manual(&mut self, input: &ManualInput) -> Result<()> {
        if input.latitude_degrees != self.location.latitude_degrees() {
            self.location = Location::new(input.latitude_degrees, self.location.longitude_degrees())?;
        }
        self.sweep = None;
        self.day_of_year = input.day_of_year;
        self.sun = SunPosition::from_hour_angle(
            input.position_degrees - 180.0,
            f64::from(input.day_of_year),
            self.location.latitude_radians(),
            self.altitude_scale,
        );
        Ok(())
    }

    /// Inputs for the next frame. Resamples the altitude curve only if the
    /// day or latitude changed since the last snapshot.
    pub fn snapshot(&mut self) -> FrameInput {
        let latitude_degrees = self.location.latitude_degrees();
        FrameInput {
            sun: self.sun,
            curve: self.curves.get(self.day_of_year, latitude_degrees),
            day_of_year: self.day_of_year,
            latitude_degrees,
        }
    }

    #[inline]
    pub fn sun(&self) -> SunPosition {
        self.sun
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.sweep.is_some_and(|s| !s.is_finished())
    }

    /// The altitude curve cache, for inspecting how often it resamples.
    #[inline]
    pub fn curve_cache(&self) -> &AltitudeCurveCache {
        &self.curves
    }

    fn true_position(&self, date: &GeoDate) -> SunPosition {
        compute_sun_position(
            date,
            self.location.latitude_degrees(),
            self.location.longitude_degrees(),
            self.altitude_scale,
        )
    }

    fn sweep_position(&self, sweep: &SunSweep) -> SunPosition {
        SunPosition::from_hour_angle(
            sweep.hour_angle_degrees(),
            f64::from(self.day_of_year),
            self.location.latitude_radians(),
            self.altitude_scale,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> Location {
        Location::new(51.5, -0.1).unwrap()
    }

    #[test]
    fn test_set_date_matches_ephemeris() {
        let mut state = RenderState::new(london(), 0.8);
        let date = GeoDate::utc(2024, 6, 21, 12, 0, 0).unwrap();
        state.set_date(date);

        let expected = compute_sun_position(&date, 51.5, -0.1, 0.8);
        assert_eq!(state.sun(), expected);
        assert!(!state.is_animating());

        let frame = state.snapshot();
        assert_eq!(frame.day_of_year, 173);
        assert_eq!(frame.curve.len(), 201);
    }

    #[test]
    fn test_snapshot_reuses_curve() {
        let mut state = RenderState::new(london(), 0.8);
        state.set_date(GeoDate::utc(2024, 6, 21, 12, 0, 0).unwrap());
        let a = state.snapshot();
        state.set_date(GeoDate::utc(2024, 6, 21, 15, 0, 0).unwrap());
        let b = state.snapshot();

        assert!(Arc::ptr_eq(&a.curve, &b.curve));
        assert_ne!(a.sun, b.sun);
        assert_eq!(state.curve_cache().recompute_count(), 1);

        state.set_date(GeoDate::utc(2024, 6, 22, 12, 0, 0).unwrap());
        state.snapshot();
        assert_eq!(state.curve_cache().recompute_count(), 2);
    }

    #[test]
    fn test_sweep_ends_at_true_position() {
        let mut state = RenderState::new(london(), 0.8);
        let date = GeoDate::utc(2024, 6, 21, 12, 0, 0).unwrap();
        state.start_sweep(date);

        assert!(state.is_animating());
        assert!((state.sun().x + 1.0).abs() < 1e-6, "sweep starts at midnight");

        let mut frames = 0;
        let mut prev_x = state.sun().x;
        while state.advance() {
            frames += 1;
            assert!(state.sun().x >= prev_x);
            prev_x = state.sun().x;
            assert!(frames < 1000);
        }
        assert!(frames > 10);
        assert!(!state.is_animating());
        assert_eq!(state.sun(), compute_sun_position(&date, 51.5, -0.1, 0.8));
    }

    #[test]
    fn test_refresh_extends_sweep() {
        let mut state = RenderState::new(london(), 0.8);
        state.start_sweep(GeoDate::utc(2024, 6, 21, 9, 0, 0).unwrap());
        while state.advance() {}
        let morning = state.sun();

        let later = GeoDate::utc(2024, 6, 21, 9, 30, 0).unwrap();
        state.refresh(later);
        assert!(state.is_animating());
        while state.advance() {}
        assert!(state.sun().x > morning.x);
        assert_eq!(state.sun(), compute_sun_position(&later, 51.5, -0.1, 0.8));
    }

    #[test]
    fn test_manual_input() {
        let mut state = RenderState::new(london(), 0.8);
        let input = ManualInput {
            position_degrees: 180.0,
            latitude_degrees: 0.0,
            day_of_year: 80,
        };
        state.apply_manual(&input).unwrap();

        let sun = state.sun();
        assert!(sun.x.abs() < 1e-6);
        assert!(sun.y > 0.79, "equator noon near equinox: y = {}", sun.y);
        assert_eq!(state.location().latitude_degrees(), 0.0);
        assert_eq!(state.location().longitude_degrees(), -0.1);

        let frame = state.snapshot();
        assert_eq!(frame.day_of_year, 80);
        assert_eq!(frame.latitude_degrees, 0.0);

        let bad = ManualInput {
            latitude_degrees: 100.0,
            ..input
        };
        assert!(state.apply_manual(&bad).is_err());
    }
}

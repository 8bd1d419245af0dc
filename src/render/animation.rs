//! Sun sweep animation.
//!
//! Moves the sun from midnight (hour angle -180 degrees) up to its current
//! position, fast through the middle of the arc and easing in at both ends.

use std::f64::consts::PI;

use crate::ephemeris::wrap_hour_angle;

/// Animation progress along the day, in degrees from midnight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunSweep {
    /// Current angle in degrees, 0 = midnight before, 180 = solar noon.
    angle: f64,
    /// Angle at which the sweep stops.
    limit: f64,
    finished: bool,
    steps: u32,
}

impl SunSweep {
    /// Sweep from midnight towards `target_hour_angle_degrees` (any range).
    pub fn new(target_hour_angle_degrees: f64) -> Self {
        let mut sweep = Self {
            angle: 0.0,
            limit: 0.0,
            finished: false,
            steps: 0,
        };
        sweep.retarget(target_hour_angle_degrees);
        sweep
    }

    /// Change the end point, resuming from the current angle.
    ///
    /// A target at or behind the current angle (for instance after midnight
    /// has passed) finishes the sweep immediately.
    pub fn retarget(&mut self, target_hour_angle_degrees: f64) {
        self.limit = wrap_hour_angle(target_hour_angle_degrees) + 180.0;
        self.finished = !(self.angle < self.limit);
    }

    /// Step size at the current angle: `(cos(angle / limit * PI) + 1)^0.25`.
    fn step_size(&self) -> f64 {
        ((self.angle / self.limit * PI).cos() + 1.0).powf(0.25)
    }

    /// Move one tick forward. Returns `false` once the sweep has reached its end.
    pub fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if self.angle >= self.limit {
            self.finished = true;
            log::debug!("Sun sweep reached {:.2} deg after {} steps", self.angle, self.steps);
            return false;
        }

        let step = self.step_size();
        if step > f64::EPSILON {
            self.angle += step;
        } else {
            // cos() has rounded to -1 just short of the limit
            self.angle = self.limit;
        }
        self.steps += 1;
        true
    }

    /// Current angle in degrees from midnight.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current hour angle in degrees.
    #[inline]
    pub fn hour_angle_degrees(&self) -> f64 {
        self.angle - 180.0
    }

    /// End angle in degrees from midnight.
    #[inline]
    pub fn limit(&self) -> f64 {
        self.limit
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of ticks taken so far.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }
}

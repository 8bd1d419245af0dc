//! Frame pacing for the redraw loop

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of recent frame times kept for the rolling average
const HISTORY_LEN: usize = 120;

/// Tracks frame timing against a fixed redraw cadence
///
/// Call [`begin_frame`](Self::begin_frame) before a frame's work and
/// [`tick`](Self::tick) after it. The next frame is due one interval after
/// the current one began, so waiting for [`time_until_next`](Self::time_until_next)
/// absorbs the work time instead of adding to it.
pub struct FrameTimer {
    interval: Duration,
    frame_start: Instant,
    /// Work time of the last finished frame
    delta: Duration,
    frame_count: u64,
    /// Most recent frame times in seconds, oldest first
    frame_history: VecDeque<f32>,
}

impl FrameTimer {
    /// Create a timer targeting one frame every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_start: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
            frame_history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Mark the start of a frame's work
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Call once per frame after the frame's work is done
    pub fn tick(&mut self) {
        self.record(self.frame_start.elapsed());
    }

    fn record(&mut self, delta: Duration) {
        self.delta = delta;
        self.frame_count += 1;

        if self.frame_history.len() == HISTORY_LEN {
            self.frame_history.pop_front();
        }
        self.frame_history.push_back(delta.as_secs_f32());
    }

    /// Time left before the next frame is due, zero when already late
    pub fn time_until_next(&self) -> Duration {
        self.interval.saturating_sub(self.frame_start.elapsed())
    }

    /// Whether the last frame's work took longer than the target interval
    #[inline]
    pub fn over_budget(&self) -> bool {
        self.frame_count > 0 && self.delta > self.interval
    }

    /// Work time of the last frame in seconds
    #[inline]
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Target interval between frames
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Get total frame count
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frame time in milliseconds over the recent history
    pub fn average_frame_ms(&self) -> f32 {
        if self.frame_history.is_empty() {
            return 0.0;
        }
        let total: f32 = self.frame_history.iter().sum();
        total / self.frame_history.len() as f32 * 1000.0
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

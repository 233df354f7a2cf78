// Time-driven scalar interpolation

use crate::core::math::ease_linear;

/// Interpolates a scalar from `start` to `end` over `duration` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f32,
    distance: f32,
    duration: f32,
    time_passed: f32,
    current: f32,
    finished: bool,
}

impl Tween {
    /// Create a tween at its start value
    pub fn new(start: f32, end: f32, duration: f32) -> Self {
        let duration = duration.max(0.0);
        let mut tween = Self {
            start,
            distance: end - start,
            duration,
            time_passed: 0.0,
            current: start,
            finished: false,
        };
        if duration == 0.0 {
            tween.finish();
        }
        tween
    }

    /// Advance the tween clock by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }

        self.time_passed += dt.max(0.0);
        self.current = ease_linear(self.time_passed, self.start, self.distance, self.duration);

        if self.time_passed >= self.duration {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.current = self.start + self.distance;
        self.finished = true;
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Whether the end value has been reached and the duration elapsed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Seconds elapsed since the tween started
    pub fn time_passed(&self) -> f32 {
        self.time_passed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

// Math utilities shared by tweens and stats

/// Clamp a value into `[min, max]`
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation from `a` to `b` by `t`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear easing: the value `elapsed` seconds into a `duration` second
/// change of `distance` starting at `start`. Clamped to the end value.
pub fn ease_linear(elapsed: f32, start: f32, distance: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return start + distance;
    }
    lerp(start, start + distance, clamp(elapsed / duration, 0.0, 1.0))
}

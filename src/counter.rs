use std::time::{Duration, Instant};

pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(1000);

/// Cubic ease-in-out over `t` in `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A number that counts up from zero to its target, advanced once per frame.
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    target: usize,
    duration: Duration,
    started: Option<Instant>,
    current: usize,
}

impl Default for AnimatedCounter {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTER_DURATION)
    }
}

impl AnimatedCounter {
    pub fn new(duration: Duration) -> Self {
        Self {
            target: 0,
            duration,
            started: None,
            current: 0,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn value(&self) -> usize {
        self.current
    }

    /// Restarts from zero when the target changes.
    pub fn retarget(&mut self, target: usize) {
        if target != self.target || self.started.is_none() {
            self.target = target;
            self.current = 0;
            self.started = None;
        }
    }

    pub fn is_running(&self) -> bool {
        self.current != self.target
    }

    /// Advances to the frame at `now`; the first tick after a retarget marks
    /// the start of the animation.
    pub fn tick(&mut self, now: Instant) -> usize {
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);

        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        self.current = (ease_in_out_cubic(progress) * self.target as f64).round() as usize;
        self.current
    }
}

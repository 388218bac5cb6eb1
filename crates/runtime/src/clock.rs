use foundation::time::Time;

/// Source of display-refresh timestamps.
///
/// A browser host backs this with `requestAnimationFrame`; tests and the
/// headless CLI use [`FixedStepClock`].
pub trait FrameClock {
    /// Timestamp of the next display refresh, or `None` once stopped.
    fn next_frame(&mut self) -> Option<Time>;

    /// Stops frame delivery. Subsequent `next_frame` calls return `None`.
    fn stop(&mut self);

    fn is_stopped(&self) -> bool;
}

/// Synthetic clock advancing by a constant `dt_s` per refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStepClock {
    dt_s: f64,
    emitted: u64,
    frame_limit: Option<u64>,
    stopped: bool,
}

impl FixedStepClock {
    pub fn new(dt_s: f64) -> Self {
        Self {
            dt_s,
            emitted: 0,
            frame_limit: None,
            stopped: false,
        }
    }

    /// Stop on its own after `frames` refreshes.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl FrameClock for FixedStepClock {
    fn next_frame(&mut self) -> Option<Time> {
        if self.stopped {
            return None;
        }
        if let Some(limit) = self.frame_limit {
            if self.emitted >= limit {
                self.stopped = true;
                return None;
            }
        }
        let t = Time(self.emitted as f64 * self.dt_s);
        self.emitted += 1;
        Some(t)
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

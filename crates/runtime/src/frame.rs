use foundation::time::Time;

/// Frame metadata handed to every per-frame callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based index of ticked frames (throttled clock samples are not counted).
    pub index: u64,
    /// Clock time at the start of the frame (seconds).
    pub time: Time,
    /// Seconds since the previous ticked frame.
    pub dt_s: f64,
}

impl Frame {
    pub fn new(index: u64, time: Time, dt_s: f64) -> Self {
        Self { index, time, dt_s }
    }

    /// Deterministic fixed-rate frame: `time = index * dt_s`.
    pub fn fixed(index: u64, dt_s: f64) -> Self {
        Self::new(index, Time(index as f64 * dt_s), dt_s)
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, Time(self.time.0 + self.dt_s), self.dt_s)
    }
}

use foundation::time::Time;
use tracing::{debug, warn};

use crate::channels::ChannelRegistry;
use crate::clock::FrameClock;
use crate::error::TickError;
use crate::frame::Frame;
use crate::metrics::Metrics;

pub const METRIC_TICKED: &str = "frames.ticked";
pub const METRIC_THROTTLED: &str = "frames.throttled";
pub const METRIC_FAILED: &str = "callbacks.failed";
pub const METRIC_LIVE: &str = "callbacks.live";

/// What the loop does when a callback fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the frame at the first failure and return it.
    Abort,
    /// Log every failure and keep the other callbacks running.
    #[default]
    Isolate,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LoopOptions {
    /// Upper bound on ticks per second. `None` ticks on every clock refresh.
    pub limit_fps: Option<f64>,
    pub error_policy: ErrorPolicy,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepOutcome {
    Ticked(Frame),
    Throttled,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub ticked: u64,
    pub throttled: u64,
    pub failures: Vec<TickError>,
}

/// Drives a [`ChannelRegistry`] from a [`FrameClock`].
pub struct RenderLoop<C: FrameClock> {
    clock: C,
    registry: ChannelRegistry,
    options: LoopOptions,
    metrics: Metrics,
    next_index: u64,
    last_sample: Option<Time>,
    last_tick: Option<Time>,
    throttle_acc_s: f64,
    shut_down: bool,
}

impl<C: FrameClock> RenderLoop<C> {
    pub fn new(clock: C, options: LoopOptions) -> Self {
        Self::with_registry(clock, ChannelRegistry::new(), options)
    }

    pub fn with_registry(clock: C, registry: ChannelRegistry, options: LoopOptions) -> Self {
        Self {
            clock,
            registry,
            options,
            metrics: Metrics::new(),
            next_index: 0,
            last_sample: None,
            last_tick: None,
            throttle_acc_s: 0.0,
            shut_down: false,
        }
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ChannelRegistry {
        &mut self.registry
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn options(&self) -> LoopOptions {
        self.options
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Pulls one refresh from the clock and ticks the registry unless the FPS
    /// limit says to skip it.
    ///
    /// Under [`ErrorPolicy::Isolate`] failures are logged and counted, and the
    /// step still reports `Ticked`; use [`RenderLoop::run`] to collect them.
    pub fn step(&mut self) -> Result<StepOutcome, TickError> {
        let mut failures = Vec::new();
        let outcome = self.step_collecting(&mut failures)?;
        Ok(outcome)
    }

    /// Steps until the clock stops.
    pub fn run(&mut self) -> Result<RunSummary, TickError> {
        let mut summary = RunSummary::default();
        loop {
            match self.step_collecting(&mut summary.failures)? {
                StepOutcome::Ticked(_) => summary.ticked += 1,
                StepOutcome::Throttled => summary.throttled += 1,
                StepOutcome::Stopped => break,
            }
        }
        debug!(
            ticked = summary.ticked,
            throttled = summary.throttled,
            failures = summary.failures.len(),
            "render loop finished"
        );
        Ok(summary)
    }

    /// Tears the session down: stops frame delivery first, then drops every
    /// registered callback together with whatever it owns.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.clock.stop();
        self.registry.clear_all();
        self.metrics.set_gauge(METRIC_LIVE, 0);
        self.shut_down = true;
        debug!(frames = self.next_index, "render loop shut down");
    }

    fn step_collecting(&mut self, failures: &mut Vec<TickError>) -> Result<StepOutcome, TickError> {
        if self.shut_down {
            return Ok(StepOutcome::Stopped);
        }
        let Some(now) = self.clock.next_frame() else {
            return Ok(StepOutcome::Stopped);
        };

        let delta = self.last_sample.map(|prev| now.since(prev)).unwrap_or(0.0);
        self.last_sample = Some(now);

        if let Some(fps) = self.options.limit_fps.filter(|f| f.is_finite() && *f > 0.0) {
            self.throttle_acc_s += delta;
            if self.throttle_acc_s < 1.0 / fps {
                self.metrics.inc_counter(METRIC_THROTTLED, 1);
                return Ok(StepOutcome::Throttled);
            }
            self.throttle_acc_s = 0.0;
        }

        let dt_s = self.last_tick.map(|prev| now.since(prev)).unwrap_or(0.0);
        self.last_tick = Some(now);
        let frame = Frame::new(self.next_index, now, dt_s);
        self.next_index += 1;

        match self.options.error_policy {
            ErrorPolicy::Abort => {
                if let Err(e) = self.registry.tick(frame) {
                    self.metrics.inc_counter(METRIC_FAILED, 1);
                    return Err(e);
                }
            }
            ErrorPolicy::Isolate => {
                for e in self.registry.tick_isolated(frame) {
                    warn!(error = %e, "frame callback failed");
                    self.metrics.inc_counter(METRIC_FAILED, 1);
                    failures.push(e);
                }
            }
        }

        self.metrics.inc_counter(METRIC_TICKED, 1);
        self.metrics
            .set_gauge(METRIC_LIVE, self.registry.len() as i64);
        Ok(StepOutcome::Ticked(frame))
    }
}

impl<C: FrameClock> Drop for RenderLoop<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

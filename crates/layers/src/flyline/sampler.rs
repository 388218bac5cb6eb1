use std::rc::Rc;

use foundation::math::Vec2;
use formats::FlywireSpec;
use runtime::{CallbackError, ChannelRegistry, Frame, Subscription};

use super::error::FlylineError;
use super::resample::{path_length, resample};
use super::sink::LineSink;

/// Half-open range `[start, end)` into the resampled path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

impl Window {
    /// Clamps `[cursor, cursor + length]` into `[0, resolution]`.
    pub fn at(cursor: f64, length: f64, resolution: usize) -> Self {
        let res = resolution as f64;
        let start = cursor.clamp(0.0, res).floor() as usize;
        let end = (cursor + length).clamp(0.0, res).floor() as usize;
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Validated flyline parameters and the path resampled once.
#[derive(Debug, Clone)]
pub struct FlylineSampler {
    path: Rc<[Vec2]>,
    length: f64,
    step: f64,
    repeat: usize,
    is_grow: bool,
}

impl FlylineSampler {
    pub fn new(spec: &FlywireSpec) -> Result<Self, FlylineError> {
        if spec.points.len() < 2 {
            return Err(FlylineError::TooFewWaypoints {
                got: spec.points.len(),
            });
        }
        for &[x, y] in &spec.points {
            for value in [x, y] {
                if !value.is_finite() {
                    return Err(FlylineError::InvalidParameter {
                        name: "points",
                        value,
                    });
                }
            }
        }
        if spec.total_points < 2 {
            return Err(FlylineError::InvalidParameter {
                name: "totalPoints",
                value: spec.total_points as f64,
            });
        }
        if spec.repeat == 0 {
            return Err(FlylineError::InvalidParameter {
                name: "repeat",
                value: 0.0,
            });
        }
        if !(spec.length.is_finite() && spec.length >= 0.0) {
            return Err(FlylineError::InvalidParameter {
                name: "length",
                value: spec.length,
            });
        }
        if !(spec.step.is_finite() && spec.step > 0.0) {
            return Err(FlylineError::InvalidParameter {
                name: "step",
                value: spec.step,
            });
        }

        let waypoints = spec.waypoints();
        if path_length(&waypoints) <= 0.0 {
            return Err(FlylineError::ZeroLengthPath);
        }

        Ok(Self {
            path: resample(&waypoints, spec.total_points).into(),
            length: spec.length,
            step: spec.step,
            repeat: spec.repeat,
            is_grow: spec.is_grow,
        })
    }

    pub fn path(&self) -> Rc<[Vec2]> {
        Rc::clone(&self.path)
    }

    pub fn resolution(&self) -> usize {
        self.path.len()
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    /// Where sweep `k` starts: sweeps are spread evenly along the path and,
    /// when growing, shifted back by one window so they enter with no length.
    pub fn initial_cursor(&self, k: usize) -> f64 {
        let spacing = self.resolution() as f64 / self.repeat as f64;
        spacing * k as f64 + self.reset_cursor()
    }

    /// Cursor value a sweep jumps back to after passing the end of the path.
    pub fn reset_cursor(&self) -> f64 {
        if self.is_grow { -self.length } else { 0.0 }
    }

    pub fn sweep(&self, k: usize, sink: Box<dyn LineSink>) -> Sweep {
        Sweep {
            cursor: self.initial_cursor(k),
            reset_to: self.reset_cursor(),
            length: self.length,
            step: self.step,
            path: self.path(),
            sink,
        }
    }

    /// One sweep per repeat, each with its own sink.
    pub fn sweeps<S, F>(&self, mut sink_for: F) -> Vec<Sweep>
    where
        S: LineSink + 'static,
        F: FnMut(usize) -> S,
    {
        (0..self.repeat)
            .map(|k| self.sweep(k, Box::new(sink_for(k))))
            .collect()
    }

    /// Registers every sweep on `channel`; each callback owns its sweep.
    pub fn register<S, F>(
        &self,
        registry: &mut ChannelRegistry,
        channel: &str,
        sink_for: F,
    ) -> Vec<Subscription>
    where
        S: LineSink + 'static,
        F: FnMut(usize) -> S,
    {
        self.sweeps(sink_for)
            .into_iter()
            .map(|mut sweep| registry.add_to(channel, move |frame| sweep.tick(frame)))
            .collect()
    }
}

/// One moving highlight along a shared resampled path.
pub struct Sweep {
    cursor: f64,
    reset_to: f64,
    length: f64,
    step: f64,
    path: Rc<[Vec2]>,
    sink: Box<dyn LineSink>,
}

impl std::fmt::Debug for Sweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sweep")
            .field("cursor", &self.cursor)
            .field("length", &self.length)
            .field("step", &self.step)
            .field("resolution", &self.path.len())
            .finish()
    }
}

impl Sweep {
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Current window without moving.
    pub fn window(&self) -> Window {
        Window::at(self.cursor, self.length, self.path.len())
    }

    pub fn visible(&self) -> &[Vec2] {
        let w = self.window();
        &self.path[w.start..w.end]
    }

    /// Moves one step, wrapping once the cursor passes the end of the path.
    pub fn advance(&mut self) -> Window {
        self.cursor += self.step;
        if self.cursor > self.path.len() as f64 {
            self.cursor = self.reset_to;
        }
        self.window()
    }

    pub fn tick(&mut self, _frame: Frame) -> Result<(), CallbackError> {
        let w = self.advance();
        self.sink.set_points(&self.path[w.start..w.end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyline::sink::{LineGeometry, SharedLine, shared_line};
    use pretty_assertions::assert_eq;

    fn gun_spec() -> FlywireSpec {
        FlywireSpec::new(vec![[0.0, 0.0], [100.0, 0.0], [100.0, 50.0]], 80.0, 1.2).with_repeat(4)
    }

    #[test]
    fn initial_cursors_are_staggered() {
        let sampler = FlylineSampler::new(&gun_spec()).unwrap();
        let cursors: Vec<f64> = (0..4).map(|k| sampler.initial_cursor(k)).collect();
        assert_eq!(cursors, vec![-80.0, 45.0, 170.0, 295.0]);

        let no_grow = FlylineSampler::new(&gun_spec().with_grow(false)).unwrap();
        assert_eq!(no_grow.initial_cursor(1), 125.0);
        assert_eq!(no_grow.reset_cursor(), 0.0);
    }

    #[test]
    fn cursors_wrap_to_reset_and_never_pass_the_end() {
        let sampler = FlylineSampler::new(&gun_spec()).unwrap();
        let mut sweeps = sampler.sweeps(|_| LineGeometry::new());
        let mut wraps = vec![0; sweeps.len()];
        for _ in 0..2000 {
            for (i, sweep) in sweeps.iter_mut().enumerate() {
                let before = sweep.cursor();
                sweep.advance();
                let after = sweep.cursor();
                assert!(after <= 500.0, "cursor {after} passed the end");
                if after < before {
                    assert_eq!(after, -80.0);
                    wraps[i] += 1;
                }
            }
        }
        assert!(wraps.iter().all(|&w| w >= 3), "{wraps:?}");
    }

    #[test]
    fn windows_stay_inside_the_path() {
        for cursor in [-500.0, -80.0, -1.5, 0.0, 10.7, 420.0, 499.9, 500.0, 750.0] {
            let w = Window::at(cursor, 80.0, 500);
            assert!(w.start <= w.end);
            assert!(w.end <= 500);
        }
        assert_eq!(Window::at(-80.0, 80.0, 500), Window { start: 0, end: 0 });
        assert_eq!(Window::at(-30.5, 80.0, 500), Window { start: 0, end: 49 });
        assert_eq!(Window::at(470.0, 80.0, 500), Window { start: 470, end: 500 });
        assert!(Window::at(600.0, 80.0, 500).is_empty());
    }

    #[test]
    fn grow_in_starts_empty_and_lengthens() {
        let spec = FlywireSpec::new(vec![[0.0, 0.0], [10.0, 0.0]], 20.0, 5.0).with_total_points(100);
        let sampler = FlylineSampler::new(&spec).unwrap();
        let line = shared_line();
        let handle = line.clone();
        let mut sweep = sampler.sweep(0, Box::new(line));
        assert!(sweep.visible().is_empty());
        let lens: Vec<usize> = (0..5)
            .map(|i| {
                sweep.tick(Frame::fixed(i, 1.0 / 60.0)).unwrap();
                handle.borrow().len()
            })
            .collect();
        assert_eq!(lens, vec![5, 10, 15, 20, 20]);
        assert_eq!(handle.borrow().revision(), 5);
        assert_eq!(handle.borrow().points()[0], sampler.path()[5]);
    }

    #[test]
    fn sweeps_share_one_resampled_path() {
        let sampler = FlylineSampler::new(&gun_spec()).unwrap();
        let path = sampler.path();
        assert_eq!(path.len(), 500);
        assert_eq!(Rc::strong_count(&path), 2);
        let sweeps = sampler.sweeps(|_| LineGeometry::new());
        assert_eq!(sweeps.len(), 4);
        assert_eq!(Rc::strong_count(&path), 6);
    }

    #[test]
    fn register_drives_lines_through_the_registry() {
        let sampler = FlylineSampler::new(&gun_spec()).unwrap();
        let lines: Vec<SharedLine> = (0..4).map(|_| shared_line()).collect();
        let mut registry = ChannelRegistry::new();
        let subs = sampler.register(&mut registry, "flywire", |k| lines[k].clone());
        assert_eq!(subs.len(), 4);
        assert_eq!(registry.channel_len("flywire"), 4);

        registry.tick(Frame::fixed(0, 1.0 / 60.0)).unwrap();
        // Cursors are now -78.8, 46.2, 171.2 and 296.2.
        let lens: Vec<usize> = lines.iter().map(|l| l.borrow().len()).collect();
        assert_eq!(lens, vec![1, 80, 80, 80]);
    }

    #[test]
    fn malformed_specs_are_rejected() {
        let single = FlywireSpec::new(vec![[1.0, 1.0]], 10.0, 1.0);
        assert_eq!(
            FlylineSampler::new(&single).unwrap_err(),
            FlylineError::TooFewWaypoints { got: 1 }
        );
        let flat = FlywireSpec::new(vec![[1.0, 1.0], [1.0, 1.0]], 10.0, 1.0);
        assert_eq!(FlylineSampler::new(&flat).unwrap_err(), FlylineError::ZeroLengthPath);
        let zero_repeat = gun_spec().with_repeat(0);
        assert!(matches!(
            FlylineSampler::new(&zero_repeat),
            Err(FlylineError::InvalidParameter { name: "repeat", .. })
        ));
        let bad_step = FlywireSpec::new(vec![[0.0, 0.0], [1.0, 0.0]], 10.0, 0.0);
        assert!(matches!(
            FlylineSampler::new(&bad_step),
            Err(FlylineError::InvalidParameter { name: "step", .. })
        ));
    }
}

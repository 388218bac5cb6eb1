use formats::FlylinePresets;
use layers::FlylineLayer;
use runtime::{ErrorPolicy, FixedStepClock, LoopOptions, RenderLoop};
use serde::Serialize;
use tracing::info;

/// Headless run of one preset mode on a synthetic clock.
#[derive(Debug, Clone, PartialEq)]
pub struct FlylineRun {
    pub mode: String,
    pub frames: u64,
    pub dt_s: f64,
    pub fps_limit: Option<f64>,
    pub channel: String,
}

impl FlylineRun {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            frames: 600,
            dt_s: 1.0 / 60.0,
            fps_limit: None,
            channel: "flywire".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathReport {
    pub name: String,
    pub sweeps: usize,
    /// Lit points per sweep after the last frame.
    pub lit_points: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlylineReport {
    pub mode: String,
    pub ticked: u64,
    pub throttled: u64,
    pub failures: usize,
    pub paths: Vec<PathReport>,
}

pub fn run_flyline(presets: &FlylinePresets, run: &FlylineRun) -> Result<FlylineReport, String> {
    if !(run.dt_s.is_finite() && run.dt_s > 0.0) {
        return Err(format!("--dt must be a positive number of seconds, got {}", run.dt_s));
    }
    if let Some(fps) = run.fps_limit {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(format!("--fps-limit must be positive, got {fps}"));
        }
    }

    let paths = presets.mode(&run.mode).map_err(|e| e.to_string())?;
    let clock = FixedStepClock::new(run.dt_s).with_frame_limit(run.frames);
    let options = LoopOptions {
        limit_fps: run.fps_limit,
        error_policy: ErrorPolicy::Isolate,
    };
    let mut render = RenderLoop::new(clock, options);
    let mut layer = FlylineLayer::new(1, run.channel.clone());
    let handles = layer
        .draw_mode(render.registry_mut(), &paths)
        .map_err(|e| e.to_string())?;
    info!(mode = %run.mode, paths = handles.len(), frames = run.frames, "running flylines");

    let summary = render.run().map_err(|e| e.to_string())?;

    let reports = handles
        .iter()
        .zip(&paths)
        .map(|(handle, (name, _))| {
            let lit_points: Vec<usize> = layer
                .lines(*handle)
                .map(|lines| lines.iter().map(|l| l.borrow().len()).collect())
                .unwrap_or_default();
            PathReport {
                name: name.clone(),
                sweeps: lit_points.len(),
                lit_points,
            }
        })
        .collect();

    render.shutdown();
    Ok(FlylineReport {
        mode: run.mode.clone(),
        ticked: summary.ticked,
        throttled: summary.throttled,
        failures: summary.failures.len(),
        paths: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn presets() -> FlylinePresets {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../formats/assets/flow_presets.json");
        let payload = std::fs::read_to_string(path).expect("read presets");
        FlylinePresets::from_json_str(&payload).expect("parse presets")
    }

    #[test]
    fn runs_a_mode_to_completion() {
        let mut run = FlylineRun::new("transport");
        run.frames = 120;
        let report = run_flyline(&presets(), &run).unwrap();
        assert_eq!(report.ticked, 120);
        assert_eq!(report.throttled, 0);
        assert_eq!(report.failures, 0);
        let names: Vec<_> = report.paths.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ups_to_fireSystem", "ups_to_ems", "ups_to_bau"]);
        assert!(report.paths.iter().all(|p| p.sweeps == p.lit_points.len()));
    }

    #[test]
    fn fps_limit_halves_ticks() {
        let mut run = FlylineRun::new("guns");
        run.frames = 8;
        run.dt_s = 0.25;
        run.fps_limit = Some(2.0);
        let report = run_flyline(&presets(), &run).unwrap();
        assert_eq!(report.ticked + report.throttled, 8);
        assert!(report.throttled > 0);
    }

    #[test]
    fn unknown_mode_and_bad_dt_are_errors() {
        assert!(run_flyline(&presets(), &FlylineRun::new("warp")).is_err());
        let mut run = FlylineRun::new("transport");
        run.dt_s = 0.0;
        assert!(run_flyline(&presets(), &run).is_err());
    }

    #[test]
    fn empty_mode_runs_with_no_paths() {
        let mut run = FlylineRun::new("shutdown");
        run.frames = 5;
        let report = run_flyline(&presets(), &run).unwrap();
        assert!(report.paths.is_empty());
        assert_eq!(report.ticked, 5);
    }
}

pub mod flyline_run;
pub mod mesh_report;

pub use flyline_run::{FlylineReport, FlylineRun, PathReport, run_flyline};
pub use mesh_report::{FeatureReport, MeshReport, MeshTarget, SkippedReport, build_mesh_report};

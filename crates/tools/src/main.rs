use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use formats::{FeatureCollection, FlylinePresets};
use layers::mesh::GridConfig;
use serde::Serialize;
use tools::{FlylineRun, MeshTarget, build_mesh_report, run_flyline};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowviz", version, about = "Polygon meshing and flyline playback, headless")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mesh every feature of a GeoJSON FeatureCollection and print a JSON report
    Mesh {
        /// Input .geojson / .json file
        input: PathBuf,

        /// Drape polygons over a sphere (default)
        #[arg(long, conflicts_with_all = ["flat", "extrude"])]
        globe: bool,

        /// Flat planar map
        #[arg(long, conflicts_with = "extrude")]
        flat: bool,

        /// Extruded planar map with this height
        #[arg(long, value_name = "HEIGHT")]
        extrude: Option<f64>,

        /// Globe radius
        #[arg(long, default_value_t = 3.0)]
        radius: f64,

        /// Interior lattice spacing in source units
        #[arg(long, conflicts_with = "grid_fraction")]
        grid_step: Option<f64>,

        /// Interior lattice spacing as a fraction of the larger bbox side
        #[arg(long)]
        grid_fraction: Option<f64>,

        /// Upper bound on lattice points per ring
        #[arg(long, default_value_t = 10_000)]
        max_grid_points: usize,
    },

    /// Run a flyline preset mode on a synthetic clock and print a JSON summary
    Flyline {
        /// Preset file with `paths` and `modes`
        presets: PathBuf,

        /// Mode to play
        #[arg(long)]
        mode: String,

        /// Clock refreshes to run
        #[arg(long, default_value_t = 600)]
        frames: u64,

        /// Seconds between clock refreshes
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Maximum ticks per second
        #[arg(long, env = "FLOWVIZ_FPS_LIMIT")]
        fps_limit: Option<f64>,

        /// Registry channel the flylines run on
        #[arg(long, default_value = "flywire")]
        channel: String,
    },

    /// List the modes of a preset file
    Modes {
        presets: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    match args.command {
        Command::Mesh {
            input,
            globe: _,
            flat,
            extrude,
            radius,
            grid_step,
            grid_fraction,
            max_grid_points,
        } => {
            let target = match (flat, extrude) {
                (_, Some(height)) => MeshTarget::Extrude { height },
                (true, None) => MeshTarget::Flat,
                (false, None) => MeshTarget::Globe { radius },
            };
            let mut grid = match (grid_step, grid_fraction) {
                (Some(step), _) => GridConfig::fixed(step),
                (None, Some(fraction)) => GridConfig::fraction(fraction),
                (None, None) => GridConfig::default(),
            };
            grid.max_points = max_grid_points;

            let payload = read(&input)?;
            let collection =
                FeatureCollection::from_geojson_str(&payload).map_err(|e| format!("{input:?}: {e}"))?;
            info!(features = collection.features.len(), "loaded {}", input.display());
            print_json(&build_mesh_report(&collection, target, grid))
        }
        Command::Flyline {
            presets: path,
            mode,
            frames,
            dt,
            fps_limit,
            channel,
        } => {
            let presets = load_presets(&path)?;
            let run = FlylineRun {
                mode,
                frames,
                dt_s: dt,
                fps_limit,
                channel,
            };
            print_json(&run_flyline(&presets, &run)?)
        }
        Command::Modes { presets: path } => {
            let presets = load_presets(&path)?;
            let names: Vec<&str> = presets.mode_names().collect();
            print_json(&names)
        }
    }
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))
}

fn load_presets(path: &Path) -> Result<FlylinePresets, String> {
    let payload = read(path)?;
    FlylinePresets::from_json_str(&payload).map_err(|e| format!("{path:?}: {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

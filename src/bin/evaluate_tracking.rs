//! Tracks every object of a recorded track store with each estimator variant
//! and reports the RMS speed error against ground truth.
//!
//! # Usage
//!
//! ```bash
//! evaluate_tracking tracks.json gt/
//! evaluate_tracking tracks.json gt/ --variant baseline,precision --max-distance 10
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use velocity_eval::evaluation::{BadFrameConfig, TimeDeltaMode};
use velocity_eval::{
    Error, EstimatorKind, EvaluationConfig, EvaluationPipeline, GroundTruthFolder, KalmanConfig,
    SensorModel, TrackStore, build_estimator,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the serialized track store (JSON).
    track_store: PathBuf,

    /// Folder holding one `track<id>gt.txt` file per track.
    gt_folder: PathBuf,

    /// Estimator variants to evaluate, in order (baseline, precision, precision-color).
    #[arg(long = "variant", value_delimiter = ',', default_values_t = [EstimatorKind::Baseline])]
    variants: Vec<EstimatorKind>,

    /// Range in meters of the nearby-objects evaluation.
    #[arg(long, default_value_t = 5.0)]
    max_distance: f64,

    /// Measure the bad-frame time delta between consecutive frames instead of
    /// from time zero. Changes results relative to published numbers.
    #[arg(long)]
    inter_frame_time_delta: bool,
}

impl Args {
    fn evaluation_config(&self) -> EvaluationConfig {
        let time_delta_mode = if self.inter_frame_time_delta {
            TimeDeltaMode::InterFrame
        } else {
            TimeDeltaMode::Absolute
        };
        EvaluationConfig {
            max_distance: self.max_distance,
            sensor: SensorModel::hdl64(),
            bad_frames: BadFrameConfig {
                time_delta_mode,
                ..BadFrameConfig::default()
            },
        }
    }
}

fn main() -> ExitCode {
    // Diagnostics go to stderr, results to stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(err = %e, "evaluation aborted");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    println!("Loading file: {}", args.track_store.display());
    let store = TrackStore::from_path(&args.track_store)?;
    println!("Found {} tracks", store.len());

    let ground_truth = GroundTruthFolder::new(&args.gt_folder);
    let config = args.evaluation_config();
    let kalman = KalmanConfig::default();

    println!("Tracking objects - please wait...");

    for &kind in &args.variants {
        let estimator = match build_estimator(kind, &kalman) {
            Ok(estimator) => estimator,
            Err(Error::EstimatorUnavailable(kind)) => {
                warn!(variant = %kind, "estimator not available, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        println!();
        println!("{}", kind.banner());
        let mut pipeline = EvaluationPipeline::new(estimator, config.clone());
        let report = pipeline.run(store.tracks(), &ground_truth)?;
        println!("{report}");
    }

    Ok(())
}

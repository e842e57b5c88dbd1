//! Evaluation of velocity estimators against ground-truth speeds.
//!
//! Tracks flow through the stages in order: the [`TrackingHarness`] produces
//! owned [`TrackResult`]s, [`find_bad_frames`] flips their ignore flags, and
//! [`evaluate`] scores them read-only, optionally through a
//! [`DistanceFilterMask`].

mod bad_frames;
mod distance_filter;
mod evaluator;
mod ground_truth;
mod harness;
mod pipeline;
mod sensor_model;
mod track_result;

pub use bad_frames::{BadFrameClassifier, BadFrameConfig, TimeDeltaMode, find_bad_frames};
pub use distance_filter::DistanceFilterMask;
pub use evaluator::{EvaluationReport, FrameCursor, evaluate, rms};
pub use ground_truth::{GroundTruthFolder, GroundTruthSeries, GroundTruthSource};
pub use harness::{HarnessOutput, Timing, TrackingHarness};
pub use pipeline::{EvaluationConfig, EvaluationPipeline, VariantReport};
pub use sensor_model::{SensorModel, SensorResolution};
pub use track_result::TrackResult;

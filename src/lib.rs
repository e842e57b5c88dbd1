//! Scores lidar object-velocity estimators against recorded ground-truth speeds.
//!
//! Each tracked object's frames are fed to a [`VelocityEstimator`], estimates
//! that straddle a sensor-spin discontinuity or a degenerate time delta are
//! discarded, and the remaining speeds are compared with ground truth as a
//! root-mean-square error.

pub mod error;
pub mod estimator;
pub mod evaluation;
pub mod track;

pub use error::{Error, Result};
pub use estimator::{
    CentroidKalman, Estimate, EstimatorKind, KalmanConfig, VelocityEstimator, build_estimator,
};
pub use evaluation::{
    BadFrameConfig, DistanceFilterMask, EvaluationConfig, EvaluationPipeline, EvaluationReport,
    GroundTruthFolder, GroundTruthSource, SensorModel, SensorResolution, TrackResult,
    TrackingHarness, VariantReport,
};
pub use track::{Frame, Point, PointCloud, Track, TrackStore};

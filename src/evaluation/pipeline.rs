//! EvaluationPipeline for combining tracking with scoring.

use std::fmt;

use tracing::info;

use crate::error::Result;
use crate::estimator::VelocityEstimator;
use crate::evaluation::bad_frames::{BadFrameConfig, find_bad_frames};
use crate::evaluation::distance_filter::DistanceFilterMask;
use crate::evaluation::evaluator::{EvaluationReport, FrameCursor, evaluate};
use crate::evaluation::ground_truth::GroundTruthSource;
use crate::evaluation::harness::{Timing, TrackingHarness};
use crate::evaluation::sensor_model::SensorModel;
use crate::track::Track;

/// Configuration for an evaluation run.
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Range (meters) of the second, nearby-objects-only evaluation
    pub max_distance: f64,
    pub sensor: SensorModel,
    pub bad_frames: BadFrameConfig,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_distance: 5.0,
            sensor: SensorModel::hdl64(),
            bad_frames: BadFrameConfig::default(),
        }
    }
}

/// Scores of one estimator over the whole track store.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub timing: Timing,
    /// Every kept estimate
    pub overall: EvaluationReport,
    /// Kept estimates of objects within `max_distance`
    pub nearby: EvaluationReport,
    pub max_distance: f64,
}

impl fmt::Display for VariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timing.mean_ms_per_frame() {
            Some(ms) => writeln!(f, "Mean runtime per frame: {ms:.6} ms")?,
            None => writeln!(f, "Mean runtime per frame: n/a (no frames tracked)")?,
        }
        writeln!(f, "{}", self.overall)?;
        writeln!(
            f,
            "Evaluating only for objects within {:.6} m:",
            self.max_distance
        )?;
        write!(f, "{}", self.nearby)
    }
}

/// A combined runner that bundles an estimator with the scoring stages.
///
/// Tracks every object, flags bad frames, then scores the estimates twice:
/// once over all frames and once restricted to nearby objects.
pub struct EvaluationPipeline<E: VelocityEstimator> {
    harness: TrackingHarness<E>,
    config: EvaluationConfig,
}

impl<E: VelocityEstimator> EvaluationPipeline<E> {
    /// Create a new pipeline with the given estimator and config.
    pub fn new(estimator: E, config: EvaluationConfig) -> Self {
        Self {
            harness: TrackingHarness::new(estimator, config.sensor),
            config,
        }
    }

    /// Create a new pipeline with default configuration.
    pub fn with_default_config(estimator: E) -> Self {
        Self::new(estimator, EvaluationConfig::default())
    }

    /// Run the estimator over `tracks` and score it against `ground_truth`.
    pub fn run<G: GroundTruthSource + ?Sized>(
        &mut self,
        tracks: &[Track],
        ground_truth: &G,
    ) -> Result<VariantReport> {
        let mut output = self.harness.run(tracks);
        find_bad_frames(tracks, &mut output.results, &self.config.bad_frames)?;
        let results = output.results;

        let overall = evaluate(&results, ground_truth, None, &mut FrameCursor::new())?;
        info!(
            scored = overall.scored(),
            ignored = overall.ignored,
            "evaluated all objects"
        );

        let mask = DistanceFilterMask::within(tracks, self.config.max_distance);
        let nearby = evaluate(&results, ground_truth, Some(&mask), &mut FrameCursor::new())?;
        info!(
            scored = nearby.scored(),
            max_distance = self.config.max_distance,
            "evaluated nearby objects"
        );

        Ok(VariantReport {
            timing: output.timing,
            overall,
            nearby,
            max_distance: self.config.max_distance,
        })
    }
}

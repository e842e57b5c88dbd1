//! Trait for velocity estimation backends.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::evaluation::SensorResolution;
use crate::track::PointCloud;

/// Output of one estimator invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Estimated object velocity in m/s
    pub velocity: Vector3<f64>,
    /// Confidence of the frame-to-frame alignment, in [0, 1]
    pub alignment_probability: f64,
}

impl Estimate {
    pub fn new(velocity: Vector3<f64>, alignment_probability: f64) -> Self {
        Self {
            velocity,
            alignment_probability,
        }
    }

    /// Speed of the estimate (Euclidean norm of the velocity).
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Trait for velocity estimation backends.
///
/// Implement this trait to score any estimator with the evaluation harness.
/// The harness calls [`reset`](Self::reset) before every track and then feeds
/// each frame of the track in order.
///
/// # Example
///
/// ```ignore
/// use velocity_eval::{Estimate, SensorResolution, VelocityEstimator};
/// use velocity_eval::track::PointCloud;
///
/// struct Stationary;
///
/// impl VelocityEstimator for Stationary {
///     fn reset(&mut self) {}
///
///     fn estimate(&mut self, _: &PointCloud, _: f64, _: SensorResolution) -> Estimate {
///         Estimate::new(Default::default(), 1.0)
///     }
/// }
/// ```
pub trait VelocityEstimator {
    /// Forget everything learned from the previous track.
    fn reset(&mut self);

    /// Add the object's points for one frame and return the current velocity estimate.
    ///
    /// # Arguments
    /// * `points` - Points attributed to the object in this frame
    /// * `timestamp` - Capture time in seconds
    /// * `resolution` - Linear sensor resolution at the object's range
    fn estimate(
        &mut self,
        points: &PointCloud,
        timestamp: f64,
        resolution: SensorResolution,
    ) -> Estimate;
}

impl<E: VelocityEstimator + ?Sized> VelocityEstimator for Box<E> {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn estimate(
        &mut self,
        points: &PointCloud,
        timestamp: f64,
        resolution: SensorResolution,
    ) -> Estimate {
        (**self).estimate(points, timestamp, resolution)
    }
}

/// The estimator variants an evaluation run can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstimatorKind {
    /// Centroid-based Kalman filter: very fast, not very accurate
    Baseline,
    /// Geometry-only precision tracker
    Precision,
    /// Precision tracker using point colors: more accurate, much slower
    PrecisionColor,
}

impl EstimatorKind {
    /// Human-readable line printed before a variant is evaluated.
    pub fn banner(&self) -> &'static str {
        match self {
            EstimatorKind::Baseline => {
                "Tracking objects with the centroid-based Kalman filter baseline. \
                 This method is very fast but not very accurate. Please wait..."
            }
            EstimatorKind::Precision => {
                "Tracking objects with the precision tracker. \
                 This method is accurate and fairly fast. Please wait..."
            }
            EstimatorKind::PrecisionColor => {
                "Tracking objects with the precision tracker using color. \
                 This method is a bit more accurate but much slower. Please wait (will be slow)..."
            }
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EstimatorKind::Baseline => "baseline",
            EstimatorKind::Precision => "precision",
            EstimatorKind::PrecisionColor => "precision-color",
        };
        f.write_str(name)
    }
}

impl FromStr for EstimatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" | "kalman" => Ok(EstimatorKind::Baseline),
            "precision" => Ok(EstimatorKind::Precision),
            "precision-color" | "color" => Ok(EstimatorKind::PrecisionColor),
            other => Err(format!(
                "unknown estimator `{other}` (expected baseline, precision or precision-color)"
            )),
        }
    }
}

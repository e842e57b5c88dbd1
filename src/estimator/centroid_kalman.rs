//! Centroid-based Kalman filter baseline estimator.

use nalgebra::Vector3;
use ndarray::{Array1, Array2};
use tracing::trace;

use crate::estimator::kalman_filter::{KalmanConfig, KalmanFilter, velocity_of};
use crate::estimator::velocity_estimator::{Estimate, VelocityEstimator};
use crate::evaluation::SensorResolution;
use crate::track::PointCloud;

#[derive(Debug, Clone)]
struct FilterState {
    mean: Array1<f64>,
    covariance: Array2<f64>,
    timestamp: f64,
}

/// Tracks the point-cloud centroid with a constant-velocity Kalman filter.
///
/// Very fast, but the centroid shifts whenever the visible part of the
/// object changes, so estimates are noisy.
#[derive(Debug, Clone, Default)]
pub struct CentroidKalman {
    kalman_filter: KalmanFilter,
    state: Option<FilterState>,
}

impl CentroidKalman {
    pub fn new(config: KalmanConfig) -> Self {
        Self {
            kalman_filter: KalmanFilter::new(config),
            state: None,
        }
    }

    fn measurement_std(&self, resolution: SensorResolution) -> [f64; 3] {
        let floor = self.kalman_filter.config().position_std;
        let horizontal = resolution.horizontal.max(floor);
        let vertical = resolution.vertical.max(floor);
        [horizontal, horizontal, vertical]
    }
}

impl VelocityEstimator for CentroidKalman {
    fn reset(&mut self) {
        self.state = None;
    }

    fn estimate(
        &mut self,
        points: &PointCloud,
        timestamp: f64,
        resolution: SensorResolution,
    ) -> Estimate {
        let measurement = points.centroid().map(|c| [c.x, c.y, c.z]);

        let Some(state) = self.state.take() else {
            // First sighting: nothing to compare against yet.
            if let Some(measurement) = measurement {
                let (mean, covariance) = self.kalman_filter.initiate(measurement);
                self.state = Some(FilterState {
                    mean,
                    covariance,
                    timestamp,
                });
            }
            return Estimate::new(Vector3::zeros(), 0.0);
        };

        let dt = (timestamp - state.timestamp).max(0.0);
        let (mean, covariance) = self
            .kalman_filter
            .predict(&state.mean, &state.covariance, dt);

        let correction = measurement.and_then(|m| {
            self.kalman_filter
                .update(&mean, &covariance, m, self.measurement_std(resolution))
        });

        let (mean, covariance, alignment_probability) = match correction {
            Some(c) => (c.mean, c.covariance, (-0.5 * c.mahalanobis_sq).exp()),
            None => {
                trace!(timestamp, "no centroid update, keeping prediction");
                (mean, covariance, 0.0)
            }
        };

        let [vx, vy, vz] = velocity_of(&mean);
        self.state = Some(FilterState {
            mean,
            covariance,
            timestamp,
        });

        Estimate::new(Vector3::new(vx, vy, vz), alignment_probability)
    }
}

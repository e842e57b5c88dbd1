//! Velocity estimators and the trait the evaluation harness drives them through.

mod centroid_kalman;
mod kalman_filter;
mod velocity_estimator;

pub use centroid_kalman::CentroidKalman;
pub use kalman_filter::{KalmanConfig, KalmanFilter};
pub use velocity_estimator::{Estimate, EstimatorKind, VelocityEstimator};

use crate::error::{Error, Result};

/// Build one of the estimators that ship with this crate.
///
/// Only the centroid baseline is built in; the precision variants rely on
/// point-cloud registration and must be supplied through [`VelocityEstimator`].
pub fn build_estimator(
    kind: EstimatorKind,
    config: &KalmanConfig,
) -> Result<Box<dyn VelocityEstimator>> {
    match kind {
        EstimatorKind::Baseline => Ok(Box::new(CentroidKalman::new(config.clone()))),
        EstimatorKind::Precision | EstimatorKind::PrecisionColor => {
            Err(Error::EstimatorUnavailable(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_baseline() {
        assert!(build_estimator(EstimatorKind::Baseline, &KalmanConfig::default()).is_ok());
    }

    #[test]
    fn test_precision_is_unavailable() {
        let err = build_estimator(EstimatorKind::PrecisionColor, &KalmanConfig::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::EstimatorUnavailable(EstimatorKind::PrecisionColor)
        ));
    }
}

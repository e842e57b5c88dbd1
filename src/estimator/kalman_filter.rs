//! Constant-velocity Kalman filter over a 3D position using ndarray and a nalgebra-based inverse.

use ndarray::{Array1, Array2, s};

/// Measured dimensions; the state holds position (x, y, z) followed by velocity.
const NDIM: usize = 3;

/// Noise parameters of the filter.
#[derive(Debug, Clone)]
pub struct KalmanConfig {
    /// Minimum standard deviation of a position measurement in meters
    pub position_std: f64,
    /// Standard deviation of the initial velocity in m/s
    pub velocity_std: f64,
    /// Standard deviation of the unmodelled acceleration in m/s^2
    pub acceleration_std: f64,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            position_std: 0.05,
            velocity_std: 10.0,
            acceleration_std: 2.0,
        }
    }
}

/// Result of folding one measurement into the state.
#[derive(Debug, Clone)]
pub struct Correction {
    pub mean: Array1<f64>,
    pub covariance: Array2<f64>,
    /// Squared Mahalanobis distance of the innovation
    pub mahalanobis_sq: f64,
}

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    update_mat: Array2<f64>,
    config: KalmanConfig,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(KalmanConfig::default())
    }
}

impl KalmanFilter {
    pub fn new(config: KalmanConfig) -> Self {
        let mut update_mat = Array2::zeros((NDIM, 2 * NDIM));
        for i in 0..NDIM {
            update_mat[[i, i]] = 1.0;
        }

        Self { update_mat, config }
    }

    pub fn config(&self) -> &KalmanConfig {
        &self.config
    }

    /// Start a track at `measurement` with zero velocity.
    pub fn initiate(&self, measurement: [f64; NDIM]) -> (Array1<f64>, Array2<f64>) {
        let mut mean = Array1::zeros(2 * NDIM);
        for i in 0..NDIM {
            mean[i] = measurement[i];
        }

        let pos_var = self.config.position_std.powi(2);
        let vel_var = self.config.velocity_std.powi(2);
        let mut cov = Array2::zeros((2 * NDIM, 2 * NDIM));
        for i in 0..NDIM {
            cov[[i, i]] = pos_var;
            cov[[NDIM + i, NDIM + i]] = vel_var;
        }

        (mean, cov)
    }

    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        dt: f64,
    ) -> (Array1<f64>, Array2<f64>) {
        let motion_mat = motion_mat(dt);
        let new_mean = motion_mat.dot(mean);
        let new_covariance =
            motion_mat.dot(covariance).dot(&motion_mat.t()) + self.process_noise(dt);

        (new_mean, new_covariance)
    }

    /// Fold a position measurement into the state.
    ///
    /// `measurement_std` holds the per-axis measurement standard deviation.
    /// Returns `None` when the innovation covariance is singular.
    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        measurement: [f64; NDIM],
        measurement_std: [f64; NDIM],
    ) -> Option<Correction> {
        let mut innovation_cov = Array2::zeros((NDIM, NDIM));
        for i in 0..NDIM {
            innovation_cov[[i, i]] = measurement_std[i].powi(2);
        }

        let projected_mean = self.update_mat.dot(mean);
        let projected_cov =
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + innovation_cov;

        let innovation = Array1::from_vec(measurement.to_vec()) - projected_mean;

        // K = P * H^T * S^-1
        let s_inv = invert_3x3(&projected_cov)?;
        let pht = covariance.dot(&self.update_mat.t());
        let kalman_gain = pht.dot(&s_inv);

        let mahalanobis_sq = innovation.dot(&s_inv.dot(&innovation));
        let new_mean = mean + kalman_gain.dot(&innovation);
        let new_covariance = covariance - kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        Some(Correction {
            mean: new_mean,
            covariance: new_covariance,
            mahalanobis_sq,
        })
    }

    /// Discrete white-acceleration noise for a step of `dt` seconds.
    fn process_noise(&self, dt: f64) -> Array2<f64> {
        let q = self.config.acceleration_std.powi(2);
        let dt2 = dt * dt;
        let mut noise = Array2::zeros((2 * NDIM, 2 * NDIM));
        for i in 0..NDIM {
            noise[[i, i]] = q * dt2 * dt2 / 4.0;
            noise[[i, NDIM + i]] = q * dt2 * dt / 2.0;
            noise[[NDIM + i, i]] = q * dt2 * dt / 2.0;
            noise[[NDIM + i, NDIM + i]] = q * dt2;
        }
        noise
    }
}

/// Velocity part of a state mean.
pub fn velocity_of(mean: &Array1<f64>) -> [f64; NDIM] {
    let v = mean.slice(s![NDIM..]);
    [v[0], v[1], v[2]]
}

fn motion_mat(dt: f64) -> Array2<f64> {
    let mut motion_mat = Array2::eye(2 * NDIM);
    for i in 0..NDIM {
        motion_mat[[i, NDIM + i]] = dt;
    }
    motion_mat
}

/// Invert a 3x3 matrix using nalgebra (pure Rust).
fn invert_3x3(m: &Array2<f64>) -> Option<Array2<f64>> {
    let mut nm = nalgebra::Matrix3::zeros();
    for i in 0..NDIM {
        for j in 0..NDIM {
            nm[(i, j)] = m[[i, j]];
        }
    }
    let inv = nm.try_inverse()?;
    let mut res = Array2::zeros((NDIM, NDIM));
    for i in 0..NDIM {
        for j in 0..NDIM {
            res[[i, j]] = inv[(i, j)];
        }
    }
    Some(res)
}

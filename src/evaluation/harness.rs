//! Drives a velocity estimator over every frame of every track.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::estimator::VelocityEstimator;
use crate::evaluation::sensor_model::SensorModel;
use crate::evaluation::track_result::TrackResult;
use crate::track::Track;

/// Time spent inside the estimator during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    /// Total time spent in estimator calls
    pub elapsed: Duration,
    /// Number of estimates recorded (first frames excluded)
    pub recorded_frames: usize,
    /// Number of tracks processed
    pub tracks: usize,
}

impl Timing {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Mean milliseconds per recorded frame, `None` when nothing was recorded.
    pub fn mean_ms_per_frame(&self) -> Option<f64> {
        (self.recorded_frames > 0).then(|| self.elapsed_ms() / self.recorded_frames as f64)
    }
}

/// Everything the harness produced for one run.
#[derive(Debug, Clone)]
pub struct HarnessOutput {
    pub results: Vec<TrackResult>,
    pub timing: Timing,
    /// Frames handed to the estimator without any points
    pub empty_frames: usize,
}

/// Feeds tracks through an estimator and records its velocity estimates.
pub struct TrackingHarness<E: VelocityEstimator> {
    estimator: E,
    sensor: SensorModel,
}

impl<E: VelocityEstimator> TrackingHarness<E> {
    pub fn new(estimator: E, sensor: SensorModel) -> Self {
        Self { estimator, sensor }
    }

    /// Create a harness for the default 64-beam sensor.
    pub fn with_default_sensor(estimator: E) -> Self {
        Self::new(estimator, SensorModel::default())
    }

    /// Track every object and return one result per track, in track order.
    ///
    /// The estimator is reset before each track and sees every frame, but the
    /// estimate returned for a track's first frame is discarded.
    pub fn run(&mut self, tracks: &[Track]) -> HarnessOutput {
        let mut timing = Timing {
            tracks: tracks.len(),
            ..Timing::default()
        };
        let mut results = Vec::with_capacity(tracks.len());
        let mut empty_frames = 0;

        for track in tracks {
            self.estimator.reset();
            let mut track_result =
                TrackResult::with_capacity(track.track_id, track.estimate_count());

            for (j, frame) in track.frames.iter().enumerate() {
                if frame.points.is_empty() {
                    empty_frames += 1;
                }
                let resolution = self.sensor.resolution_at(&frame.centroid);

                let start = Instant::now();
                let estimate = self
                    .estimator
                    .estimate(&frame.points, frame.timestamp, resolution);
                timing.elapsed += start.elapsed();

                if j > 0 {
                    timing.recorded_frames += 1;
                    track_result.push(estimate.velocity);
                }
            }

            debug!(
                track_id = track.track_id,
                estimates = track_result.len(),
                "tracked object"
            );
            results.push(track_result);
        }

        info!(
            tracks = timing.tracks,
            frames = timing.recorded_frames,
            elapsed_ms = timing.elapsed_ms(),
            "total time for tracking {} objects",
            timing.tracks
        );

        if empty_frames > 0 {
            warn!(
                empty_frames,
                "frames without points were tracked; point-based estimates are unreliable"
            );
        }

        HarnessOutput {
            results,
            timing,
            empty_frames,
        }
    }

    /// Get a reference to the underlying estimator.
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn into_estimator(self) -> E {
        self.estimator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::Estimate;
    use crate::evaluation::SensorResolution;
    use crate::track::{Frame, Point, PointCloud};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    /// Returns the frame index within the track as the x velocity.
    #[derive(Default)]
    struct CountingEstimator {
        calls: usize,
        resets: usize,
        resolutions: Vec<SensorResolution>,
    }

    impl VelocityEstimator for CountingEstimator {
        fn reset(&mut self) {
            self.resets += 1;
            self.calls = 0;
        }

        fn estimate(
            &mut self,
            _points: &PointCloud,
            _timestamp: f64,
            resolution: SensorResolution,
        ) -> Estimate {
            let velocity = Vector3::new(self.calls as f64, 0.0, 0.0);
            self.calls += 1;
            self.resolutions.push(resolution);
            Estimate::new(velocity, 1.0)
        }
    }

    fn track(track_id: i64, frames: usize) -> Track {
        let frames = (0..frames)
            .map(|i| {
                Frame::with_centroid(
                    i as f64 * 0.1,
                    Vector3::new(10.0, 0.0, 0.0),
                    PointCloud::default(),
                )
            })
            .collect();
        Track::new(track_id, frames)
    }

    #[test]
    fn test_first_frame_not_recorded() {
        let tracks = vec![track(3, 4), track(5, 1), track(6, 0)];
        let mut harness = TrackingHarness::with_default_sensor(CountingEstimator::default());
        let output = harness.run(&tracks);

        assert_eq!(output.results.len(), 3);
        assert_eq!(output.results[0].track_id, 3);
        let speeds: Vec<f64> = output.results[0]
            .estimated_velocities()
            .iter()
            .map(|v| v.x)
            .collect();
        assert_eq!(speeds, vec![1.0, 2.0, 3.0]);
        assert_eq!(output.results[0].ignore_frame(), &[false, false, false]);
        assert!(output.results[1].is_empty());
        assert!(output.results[2].is_empty());

        assert_eq!(output.timing.recorded_frames, 3);
        assert_eq!(output.timing.tracks, 3);
        // Every frame of these tracks is centroid-only.
        assert_eq!(output.empty_frames, 5);
        assert_eq!(harness.estimator().resets, 3);
    }

    #[test]
    fn test_resolution_passed_to_estimator() {
        let tracks = vec![track(1, 2)];
        let mut harness = TrackingHarness::with_default_sensor(CountingEstimator::default());
        harness.run(&tracks);

        let expected = SensorModel::hdl64().resolution_at(&Vector3::new(10.0, 0.0, 0.0));
        let estimator = harness.into_estimator();
        assert_eq!(estimator.resolutions.len(), 2);
        assert_relative_eq!(estimator.resolutions[1].horizontal, expected.horizontal);
        assert_relative_eq!(estimator.resolutions[1].vertical, expected.vertical);
    }

    #[test]
    fn test_frames_with_points_not_counted_empty() {
        let frame = Frame::new(0.0, PointCloud::new(vec![Point::new(4.0, 0.0, 0.0)]));
        let tracks = vec![Track::new(1, vec![frame.clone(), frame])];
        let mut harness = TrackingHarness::with_default_sensor(CountingEstimator::default());
        assert_eq!(harness.run(&tracks).empty_frames, 0);
    }

    #[test]
    fn test_mean_runtime() {
        let timing = Timing {
            elapsed: Duration::from_millis(30),
            recorded_frames: 3,
            tracks: 1,
        };
        assert_relative_eq!(timing.mean_ms_per_frame().unwrap(), 10.0, epsilon = 1e-9);
        assert_eq!(Timing::default().mean_ms_per_frame(), None);
    }
}

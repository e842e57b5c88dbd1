//! Tracks and the timestamped frames they are made of.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::track::point_cloud::PointCloud;

/// Distance from the sensor ignoring elevation.
#[inline]
pub fn planar_distance(position: &Vector3<f64>) -> f64 {
    (position.x * position.x + position.y * position.y).sqrt()
}

/// One timestamped observation of a tracked object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FrameRecord", into = "FrameRecord")]
pub struct Frame {
    /// Capture time in seconds
    pub timestamp: f64,
    /// Representative position of the object in sensor-local coordinates
    pub centroid: Vector3<f64>,
    /// Points attributed to the object in this sweep
    pub points: PointCloud,
}

impl Frame {
    /// Create a frame whose centroid is the mean of its points.
    pub fn new(timestamp: f64, points: PointCloud) -> Self {
        let centroid = points.centroid().unwrap_or_else(Vector3::zeros);
        Self {
            timestamp,
            centroid,
            points,
        }
    }

    /// Create a frame with an explicitly known centroid.
    pub fn with_centroid(timestamp: f64, centroid: Vector3<f64>, points: PointCloud) -> Self {
        Self {
            timestamp,
            centroid,
            points,
        }
    }

    /// Bearing of the centroid around the sensor's vertical axis, in radians.
    #[inline]
    pub fn heading(&self) -> f64 {
        self.centroid.y.atan2(self.centroid.x)
    }

    #[inline]
    pub fn planar_distance(&self) -> f64 {
        planar_distance(&self.centroid)
    }
}

/// Serialized layout of a frame.
///
/// A stored centroid is only used when the frame carries no points; otherwise
/// the centroid is always the point mean.
#[derive(Serialize, Deserialize)]
struct FrameRecord {
    timestamp: f64,
    #[serde(default)]
    centroid: Option<Vector3<f64>>,
    #[serde(default)]
    points: PointCloud,
}

impl From<FrameRecord> for Frame {
    fn from(record: FrameRecord) -> Self {
        match (record.points.centroid(), record.centroid) {
            (None, Some(centroid)) => {
                Frame::with_centroid(record.timestamp, centroid, record.points)
            }
            _ => Frame::new(record.timestamp, record.points),
        }
    }
}

impl From<Frame> for FrameRecord {
    fn from(frame: Frame) -> Self {
        Self {
            timestamp: frame.timestamp,
            centroid: Some(frame.centroid),
            points: frame.points,
        }
    }
}

/// The full observation history of one tracked object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub track_id: i64,
    pub frames: Vec<Frame>,
}

impl Track {
    pub fn new(track_id: i64, frames: Vec<Frame>) -> Self {
        Self { track_id, frames }
    }

    /// Number of velocity estimates this track yields (one per frame after the first).
    pub fn estimate_count(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Point;
    use approx::assert_relative_eq;

    #[test]
    fn test_planar_distance_ignores_elevation() {
        assert_relative_eq!(planar_distance(&Vector3::new(3.0, 4.0, 100.0)), 5.0);
    }

    #[test]
    fn test_frame_centroid_from_points() {
        let frame = Frame::new(
            1.5,
            PointCloud::new(vec![Point::new(1.0, 1.0, 0.0), Point::new(3.0, 1.0, 2.0)]),
        );
        assert_relative_eq!(frame.centroid, Vector3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_stored_centroid_replaced_by_point_mean() {
        let frame: Frame = serde_json::from_str(
            r#"{"timestamp": 0.0, "centroid": [9.0, 9.0, 9.0],
                "points": [{"position": [1.0, 0.0, 0.0]}, {"position": [3.0, 2.0, 0.0]}]}"#,
        )
        .unwrap();
        assert_relative_eq!(frame.centroid, Vector3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_heading() {
        let frame = Frame::with_centroid(0.0, Vector3::new(0.0, 2.0, 0.0), PointCloud::default());
        assert_relative_eq!(frame.heading(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_estimate_count() {
        assert_eq!(Track::new(1, vec![]).estimate_count(), 0);
        let frame = Frame::new(0.0, PointCloud::default());
        assert_eq!(Track::new(1, vec![frame.clone()]).estimate_count(), 0);
        assert_eq!(Track::new(1, vec![frame.clone(), frame]).estimate_count(), 1);
    }
}

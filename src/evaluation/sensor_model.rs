//! Linear footprint of the lidar's sampling grid at a given range.

use nalgebra::Vector3;

use crate::track::planar_distance;

/// Linear distance in meters between adjacent lidar samples at some range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorResolution {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Angular sampling of a spinning multi-beam lidar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorModel {
    /// Angle between consecutive firings of one beam, in degrees
    pub horizontal_angular_res_deg: f64,
    /// Average angle between adjacent beams, in degrees
    pub vertical_angular_res_deg: f64,
}

impl SensorModel {
    /// 64-beam sensor spinning at 10 Hz, 64 beams spanning 26.8 vertical degrees.
    pub fn hdl64() -> Self {
        Self {
            horizontal_angular_res_deg: 0.18,
            vertical_angular_res_deg: 26.8 / 63.0,
        }
    }

    /// Resolution at `position` (sensor-local coordinates); elevation is ignored.
    pub fn resolution_at(&self, position: &Vector3<f64>) -> SensorResolution {
        let distance = planar_distance(position);
        SensorResolution {
            horizontal: footprint(distance, self.horizontal_angular_res_deg),
            vertical: footprint(distance, self.vertical_angular_res_deg),
        }
    }
}

impl Default for SensorModel {
    fn default() -> Self {
        Self::hdl64()
    }
}

#[inline]
fn footprint(distance: f64, angle_deg: f64) -> f64 {
    2.0 * distance * (angle_deg / 2.0).to_radians().tan()
}

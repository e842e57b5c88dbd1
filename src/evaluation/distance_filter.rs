//! Restricts evaluation to objects near the sensor.

use crate::error::{Error, Result};
use crate::track::Track;

/// One inclusion flag per estimate slot of every track, track-major.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceFilterMask {
    include: Vec<bool>,
}

impl DistanceFilterMask {
    pub fn new(include: Vec<bool>) -> Self {
        Self { include }
    }

    /// Keep frames whose planar distance to the sensor is at most `max_distance` meters.
    ///
    /// The first frame of each track produces no estimate and gets no entry.
    pub fn within(tracks: &[Track], max_distance: f64) -> Self {
        let include = tracks
            .iter()
            .flat_map(|track| track.frames.iter().skip(1))
            .map(|frame| frame.planar_distance() <= max_distance)
            .collect();
        Self { include }
    }

    /// Whether the estimate slot at global index `index` is kept.
    pub fn includes(&self, index: usize) -> Result<bool> {
        self.include
            .get(index)
            .copied()
            .ok_or(Error::FilterMaskTooShort {
                index,
                len: self.include.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.include.len()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    pub fn included_count(&self) -> usize {
        self.include.iter().filter(|&&keep| keep).count()
    }
}

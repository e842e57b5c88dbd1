//! Per-track velocity estimates and their ignore flags.

use nalgebra::Vector3;

/// Velocity estimates recorded for one track.
///
/// Entry `j` is the estimate produced when frame `j + 1` was added, i.e. the
/// transition from frame `j` to frame `j + 1`. Estimates and ignore flags
/// always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackResult {
    pub track_id: i64,
    estimated_velocities: Vec<Vector3<f64>>,
    ignore_frame: Vec<bool>,
}

impl TrackResult {
    pub fn new(track_id: i64) -> Self {
        Self {
            track_id,
            estimated_velocities: Vec::new(),
            ignore_frame: Vec::new(),
        }
    }

    pub fn with_capacity(track_id: i64, capacity: usize) -> Self {
        Self {
            track_id,
            estimated_velocities: Vec::with_capacity(capacity),
            ignore_frame: Vec::with_capacity(capacity),
        }
    }

    /// Record a new estimate; estimates start out kept.
    pub fn push(&mut self, velocity: Vector3<f64>) {
        self.estimated_velocities.push(velocity);
        self.ignore_frame.push(false);
    }

    /// Flag estimate `index` as unreliable. Out-of-range indices are ignored.
    pub fn ignore(&mut self, index: usize) {
        if let Some(flag) = self.ignore_frame.get_mut(index) {
            *flag = true;
        }
    }

    pub fn len(&self) -> usize {
        self.estimated_velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimated_velocities.is_empty()
    }

    pub fn estimated_velocities(&self) -> &[Vector3<f64>] {
        &self.estimated_velocities
    }

    pub fn ignore_frame(&self) -> &[bool] {
        &self.ignore_frame
    }

    pub fn is_ignored(&self, index: usize) -> bool {
        self.ignore_frame.get(index).copied().unwrap_or(false)
    }

    pub fn ignored_count(&self) -> usize {
        self.ignore_frame.iter().filter(|&&ignored| ignored).count()
    }

    /// Iterate over `(velocity, ignored)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vector3<f64>, bool)> {
        self.estimated_velocities
            .iter()
            .zip(self.ignore_frame.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_ignore() {
        let mut result = TrackResult::new(4);
        result.push(Vector3::new(1.0, 0.0, 0.0));
        result.push(Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(result.ignore_frame(), &[false, false]);

        result.ignore(1);
        result.ignore(1);
        result.ignore(10);
        assert_eq!(result.len(), 2);
        assert_eq!(result.ignore_frame(), &[false, true]);
        assert_eq!(result.ignored_count(), 1);
        assert!(result.is_ignored(1));
        assert!(!result.is_ignored(10));
    }
}

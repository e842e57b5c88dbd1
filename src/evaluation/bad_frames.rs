//! Flags velocity estimates that are structurally unreliable.
//!
//! Two situations are caught. When the sensor finishes a spin while sweeping
//! across an object, half of the object is recorded at the start of one sweep
//! and the other half at the end of it; the centroid bearing then jumps between
//! disjoint angular sectors. And when the object moved from the end of one
//! sweep to the beginning of the next, consecutive frames are only a few
//! milliseconds apart. Both make velocity estimation error prone.

use tracing::debug;

use crate::error::{Error, Result};
use crate::evaluation::track_result::TrackResult;
use crate::track::Track;

/// How the time delta between frames is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDeltaMode {
    /// The reference timestamp is never advanced, so every delta is measured
    /// from time zero. Matches the published evaluation numbers.
    #[default]
    Absolute,
    /// Delta between consecutive frames.
    InterFrame,
}

/// Thresholds of the bad-frame heuristic.
#[derive(Debug, Clone)]
pub struct BadFrameConfig {
    /// Largest bearing change (radians) treated as continuous motion
    pub heading_threshold: f64,
    /// Smallest time delta (seconds) a kept transition may have
    pub min_time_delta: f64,
    pub time_delta_mode: TimeDeltaMode,
}

impl Default for BadFrameConfig {
    fn default() -> Self {
        Self {
            heading_threshold: 1.0,
            min_time_delta: 0.05,
            time_delta_mode: TimeDeltaMode::Absolute,
        }
    }
}

/// Single forward pass over a track's frames.
#[derive(Debug, Clone)]
pub struct BadFrameClassifier {
    config: BadFrameConfig,
    prev_heading: f64,
    prev_timestamp: f64,
    skip_next: bool,
}

impl BadFrameClassifier {
    pub fn new(config: BadFrameConfig) -> Self {
        Self {
            config,
            prev_heading: 0.0,
            prev_timestamp: 0.0,
            skip_next: false,
        }
    }

    /// Whether the estimate after the next frame will be dropped unconditionally.
    pub fn skip_next(&self) -> bool {
        self.skip_next
    }

    fn reset(&mut self) {
        self.prev_heading = 0.0;
        self.prev_timestamp = 0.0;
        self.skip_next = false;
    }

    /// Flag the unreliable estimates of `result`, which must stem from `track`.
    pub fn classify(&mut self, track: &Track, result: &mut TrackResult) -> Result<()> {
        let expected = track.estimate_count();
        if result.track_id != track.track_id || result.len() != expected {
            return Err(Error::ResultMismatch {
                track_id: track.track_id,
                expected,
                actual: result.len(),
            });
        }

        self.reset();
        for (j, frame) in track.frames.iter().enumerate() {
            let heading = frame.heading();
            let heading_delta = (heading - self.prev_heading).abs();
            let time_delta = frame.timestamp - self.prev_timestamp;

            self.prev_heading = heading;
            if self.config.time_delta_mode == TimeDeltaMode::InterFrame {
                self.prev_timestamp = frame.timestamp;
            }

            if j == 0 {
                continue;
            }

            if heading_delta <= self.config.heading_threshold {
                if self.skip_next || time_delta < self.config.min_time_delta {
                    result.ignore(j - 1);
                }
                self.skip_next = false;
            } else {
                result.ignore(j - 1);
                self.skip_next = true;
                if j > 1 {
                    result.ignore(j - 2);
                }
            }
        }

        debug!(
            track_id = track.track_id,
            ignored = result.ignored_count(),
            total = result.len(),
            "classified bad frames"
        );
        Ok(())
    }
}

impl Default for BadFrameClassifier {
    fn default() -> Self {
        Self::new(BadFrameConfig::default())
    }
}

/// Run the classifier over every track; `results` must be in track order.
pub fn find_bad_frames(
    tracks: &[Track],
    results: &mut [TrackResult],
    config: &BadFrameConfig,
) -> Result<()> {
    if tracks.len() != results.len() {
        return Err(Error::ResultCount {
            expected: tracks.len(),
            actual: results.len(),
        });
    }

    let mut classifier = BadFrameClassifier::new(config.clone());
    for (track, result) in tracks.iter().zip(results.iter_mut()) {
        classifier.classify(track, result)?;
    }
    Ok(())
}

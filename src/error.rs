//! Error type shared by the whole crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::estimator::EstimatorKind;

/// Errors raised while loading inputs or scoring estimates.
#[derive(Debug, Error)]
pub enum Error {
    /// The ground-truth file for a track could not be opened.
    #[error("cannot open ground-truth file {}", path.display())]
    GroundTruthMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A track has more retained estimates than ground-truth speeds.
    #[error("ground truth for track {track_id} has {len} entries, entry {index} requested")]
    GroundTruthTooShort {
        track_id: i64,
        index: usize,
        len: usize,
    },

    /// A distance mask does not cover every estimate slot.
    #[error("distance filter has {len} entries, entry {index} requested")]
    FilterMaskTooShort { index: usize, len: usize },

    /// A track result does not line up with the track it was produced from.
    #[error("result for track {track_id} has {actual} estimates, expected {expected}")]
    ResultMismatch {
        track_id: i64,
        expected: usize,
        actual: usize,
    },

    /// The number of track results differs from the number of tracks.
    #[error("got {actual} track results for {expected} tracks")]
    ResultCount { expected: usize, actual: usize },

    /// A stored frame has no points to derive the object's position from.
    #[error("frame {index} of track {track_id} has no points")]
    EmptyFrame { track_id: i64, index: usize },

    /// The requested estimator variant is not built into this crate.
    #[error("estimator `{0}` is not available in this build")]
    EstimatorUnavailable(EstimatorKind),

    /// The track store could not be parsed.
    #[error("malformed track store: {0}")]
    TrackStore(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

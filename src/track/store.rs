//! JSON-backed collection of recorded tracks.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::track::frame::Track;

/// Ordered collection of tracks loaded for one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStore {
    tracks: Vec<Track>,
}

impl TrackStore {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Load a store from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let store = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), tracks = store.len(), "loaded track store");
        Ok(store)
    }

    /// Parse a store, rejecting frames without points.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let store: Self = serde_json::from_reader(reader)?;
        store.validate()?;
        Ok(store)
    }

    /// Every frame must carry the points its centroid is derived from.
    fn validate(&self) -> Result<()> {
        for track in &self.tracks {
            if let Some(index) = track.frames.iter().position(|f| f.points.is_empty()) {
                return Err(Error::EmptyFrame {
                    track_id: track.track_id,
                    index,
                });
            }
        }
        Ok(())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Total number of velocity estimates across all tracks.
    pub fn estimate_count(&self) -> usize {
        self.tracks.iter().map(Track::estimate_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    const STORE: &str = r#"{
        "tracks": [
            {
                "track_id": 7,
                "frames": [
                    {
                        "timestamp": 0.0,
                        "centroid": [1.0, 0.0, 0.0],
                        "points": [{ "position": [1.0, 0.5, 0.0] }]
                    },
                    {
                        "timestamp": 0.1,
                        "points": [
                            { "position": [2.0, 0.0, 0.0] },
                            { "position": [4.0, 2.0, 0.0], "color": [10, 20, 30] }
                        ]
                    }
                ]
            },
            { "track_id": 9, "frames": [] }
        ]
    }"#;

    #[test]
    fn test_from_reader() {
        let store = TrackStore::from_reader(STORE.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.estimate_count(), 1);

        let track = &store.tracks()[0];
        assert_eq!(track.track_id, 7);
        // The stored centroid gives way to the point mean.
        assert_relative_eq!(track.frames[0].centroid, Vector3::new(1.0, 0.5, 0.0));
        assert_relative_eq!(track.frames[1].centroid, Vector3::new(3.0, 1.0, 0.0));
        assert_eq!(track.frames[1].points.points()[1].color, Some([10, 20, 30]));
    }

    #[test]
    fn test_centroid_only_frame_rejected() {
        let json = r#"{"tracks": [{"track_id": 3, "frames": [
            {"timestamp": 0.0, "points": [{"position": [1.0, 0.0, 0.0]}]},
            {"timestamp": 1.0, "centroid": [4.0, 0.0, 0.0]}
        ]}]}"#;
        let err = TrackStore::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyFrame {
                track_id: 3,
                index: 1
            }
        ));
    }

    #[test]
    fn test_malformed_store() {
        let err = TrackStore::from_reader(r#"{"tracks": [{"track_id": "x"}]}"#.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::TrackStore(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = TrackStore::from_path("/nonexistent/tracks.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

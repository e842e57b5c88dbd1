//! Reference speeds recorded for each track.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};

/// Ground-truth speeds (m/s) of one track, one per retained estimate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruthSeries {
    track_id: i64,
    speeds: Vec<f64>,
}

impl GroundTruthSeries {
    pub fn new(track_id: i64, speeds: Vec<f64>) -> Self {
        Self { track_id, speeds }
    }

    /// Parse whitespace-separated speeds.
    ///
    /// Reading stops at the first token that is not a number. The longest
    /// numeric prefix of that token, if any, is still kept, so `1.5,` yields
    /// `1.5`.
    pub fn parse(track_id: i64, text: &str) -> Self {
        let mut speeds = Vec::new();
        for token in text.split_whitespace() {
            match token.parse::<f64>() {
                Ok(speed) => speeds.push(speed),
                Err(_) => {
                    speeds.extend(numeric_prefix(token));
                    break;
                }
            }
        }
        Self { track_id, speeds }
    }

    pub fn track_id(&self) -> i64 {
        self.track_id
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// Speed at `index`, failing loudly when the series is too short.
    pub fn speed(&self, index: usize) -> Result<f64> {
        self.speeds
            .get(index)
            .copied()
            .ok_or(Error::GroundTruthTooShort {
                track_id: self.track_id,
                index,
                len: self.speeds.len(),
            })
    }
}

fn numeric_prefix(token: &str) -> Option<f64> {
    (1..token.len())
        .rev()
        .filter(|&end| token.is_char_boundary(end))
        .find_map(|end| token[..end].parse().ok())
}

/// Provides the ground-truth series of a track by id.
pub trait GroundTruthSource {
    fn series(&self, track_id: i64) -> Result<GroundTruthSeries>;
}

/// A folder holding one `track<id>gt.txt` file per track.
#[derive(Debug, Clone)]
pub struct GroundTruthFolder {
    root: PathBuf,
}

impl GroundTruthFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file holding the speeds of `track_id`.
    pub fn path_for(&self, track_id: i64) -> PathBuf {
        self.root.join(format!("track{track_id}gt.txt"))
    }
}

impl GroundTruthSource for GroundTruthFolder {
    fn series(&self, track_id: i64) -> Result<GroundTruthSeries> {
        let path = self.path_for(track_id);
        let text = fs::read_to_string(&path).map_err(|source| Error::GroundTruthMissing {
            path: path.clone(),
            source,
        })?;
        let series = GroundTruthSeries::parse(track_id, &text);
        debug!(track_id, speeds = series.len(), path = %path.display(), "loaded ground truth");
        Ok(series)
    }
}

/// Ground truth held in memory, keyed by track id.
impl GroundTruthSource for HashMap<i64, Vec<f64>> {
    fn series(&self, track_id: i64) -> Result<GroundTruthSeries> {
        self.get(&track_id)
            .map(|speeds| GroundTruthSeries::new(track_id, speeds.clone()))
            .ok_or_else(|| Error::GroundTruthMissing {
                path: PathBuf::from(format!("track{track_id}gt.txt")),
                source: std::io::ErrorKind::NotFound.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2.1\n9.5\n", &[2.1, 9.5])]
    #[case("1.0 2.0\n\n3.0", &[1.0, 2.0, 3.0])]
    #[case("1.5\nx?\n2.5\n", &[1.5])]
    #[case("1.5,\n2.0\n", &[1.5])]
    #[case("4.0 2.5m/s 3.0", &[4.0, 2.5])]
    #[case("1e\n2.0", &[1.0])]
    #[case("", &[])]
    fn test_parse(#[case] text: &str, #[case] expected: &[f64]) {
        assert_eq!(GroundTruthSeries::parse(3, text).speeds(), expected);
    }

    #[test]
    fn test_speed_past_end() {
        let series = GroundTruthSeries::new(8, vec![1.0]);
        assert_eq!(series.speed(0).unwrap(), 1.0);
        let err = series.speed(1).unwrap_err();
        assert!(matches!(
            err,
            Error::GroundTruthTooShort {
                track_id: 8,
                index: 1,
                len: 1
            }
        ));
    }

    #[test]
    fn test_folder_reads_track_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("track12gt.txt"), "4.25\n5.5\n").unwrap();

        let folder = GroundTruthFolder::new(dir.path());
        let series = folder.series(12).unwrap();
        assert_eq!(series.speeds(), &[4.25, 5.5]);
        assert_eq!(series.track_id(), 12);
    }

    #[test]
    fn test_folder_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let folder = GroundTruthFolder::new(dir.path());
        let err = folder.series(3).unwrap_err();
        match err {
            Error::GroundTruthMissing { path, .. } => {
                assert_eq!(path, dir.path().join("track3gt.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Scores velocity estimates against ground-truth speeds.

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::evaluation::distance_filter::DistanceFilterMask;
use crate::evaluation::ground_truth::GroundTruthSource;
use crate::evaluation::track_result::TrackResult;

/// Root-mean-square of `errors`, `None` for an empty slice.
pub fn rms(errors: &[f64]) -> Option<f64> {
    if errors.is_empty() {
        return None;
    }
    let sum_sq: f64 = errors.iter().map(|e| e * e).sum();
    Some((sum_sq / errors.len() as f64).sqrt())
}

/// Position of the next estimate slot across all tracks.
///
/// Advances once per slot, whether or not the slot is scored, so it stays
/// aligned with a [`DistanceFilterMask`] built from the same tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameCursor {
    next: usize,
}

impl FrameCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current slot index and move past it.
    pub fn advance(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        index
    }

    /// Number of slots visited so far.
    pub fn position(&self) -> usize {
        self.next
    }
}

/// Signed speed residuals collected over one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    /// Estimated minus ground-truth speed, in m/s
    pub errors: Vec<f64>,
    /// Slots dropped by the bad-frame classifier
    pub ignored: usize,
    /// Slots dropped by the distance filter
    pub filtered: usize,
}

impl EvaluationReport {
    pub fn rms_error(&self) -> Option<f64> {
        rms(&self.errors)
    }

    pub fn scored(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rms_error() {
            Some(rms) => write!(f, "RMS error: {rms:.6} m/s"),
            None => write!(f, "RMS error: n/a (no frames scored)"),
        }
    }
}

/// Pair every kept estimate with its ground-truth speed.
///
/// Ground truth lists speeds only for retained estimates, so the speed of
/// slot `j` is entry `j - skipped`, where `skipped` counts the slots of the
/// same track ignored so far. When `filter` is given, slots it excludes are
/// passed over after the ignore check.
pub fn evaluate<G: GroundTruthSource + ?Sized>(
    results: &[TrackResult],
    ground_truth: &G,
    filter: Option<&DistanceFilterMask>,
    cursor: &mut FrameCursor,
) -> Result<EvaluationReport> {
    let mut report = EvaluationReport::default();

    for track_result in results {
        let series = ground_truth.series(track_result.track_id)?;
        let mut skipped = 0;

        for (j, (velocity, ignored)) in track_result.iter().enumerate() {
            let slot = cursor.advance();

            if ignored {
                skipped += 1;
                report.ignored += 1;
                continue;
            }

            if let Some(filter) = filter {
                if !filter.includes(slot)? {
                    report.filtered += 1;
                    continue;
                }
            }

            let estimated_speed = velocity.norm();
            let gt_speed = series.speed(j - skipped)?;
            report.errors.push(estimated_speed - gt_speed);
        }

        debug!(
            track_id = track_result.track_id,
            skipped,
            "scored track"
        );
    }

    Ok(report)
}

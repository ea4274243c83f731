//! Sliding-window subsequence distance search.

use crate::error::{ImputeError, Result};
use crate::gaps::present;

/// A fully-present window compared against a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateMatch {
    /// First position of the window.
    pub start: usize,
    /// Last position of the window (inclusive).
    pub end: usize,
    /// Distance between the window's values and the probe.
    pub distance: f64,
}

/// Distance between two equal-length runs of values.
///
/// Implementations must be deterministic and side-effect-free; candidates
/// are ranked by the returned value, ascending.
pub trait DistanceMetric {
    fn distance(&self, window: &[f64], probe: &[f64]) -> f64;
}

/// Euclidean (L2) distance, the default metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, window: &[f64], probe: &[f64]) -> f64 {
        window
            .iter()
            .zip(probe)
            .map(|(w, p)| (w - p).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/// Manhattan (L1) distance, less sensitive to single-point outliers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl DistanceMetric for Manhattan {
    fn distance(&self, window: &[f64], probe: &[f64]) -> f64 {
        window.iter().zip(probe).map(|(w, p)| (w - p).abs()).sum()
    }
}

/// Compute the Euclidean distance between `probe` and every fully-present
/// window of the probe's length in `values`.
pub fn subsequence_distances(
    values: &[Option<f64>],
    probe: &[f64],
) -> Result<Vec<CandidateMatch>> {
    subsequence_distances_with(values, probe, &Euclidean)
}

/// Compute the distance between `probe` and every fully-present window of
/// the probe's length in `values`, using a caller-supplied metric.
///
/// Windows containing a missing value cannot be compared reliably and are
/// excluded from the result entirely. Candidates are emitted in source
/// order; ranking them is the caller's concern.
///
/// # Errors
/// * `InvalidInput` if the probe is empty
/// * `ProbeTooLong` if the probe is longer than the series
pub fn subsequence_distances_with<D: DistanceMetric>(
    values: &[Option<f64>],
    probe: &[f64],
    metric: &D,
) -> Result<Vec<CandidateMatch>> {
    if probe.is_empty() {
        return Err(ImputeError::InvalidInput(
            "probe must not be empty".to_string(),
        ));
    }
    if probe.len() > values.len() {
        return Err(ImputeError::ProbeTooLong {
            probe_len: probe.len(),
            series_len: values.len(),
        });
    }

    let mut candidates = Vec::new();
    let mut window = Vec::with_capacity(probe.len());

    'windows: for start in 0..=values.len() - probe.len() {
        window.clear();
        for value in &values[start..start + probe.len()] {
            match present(value) {
                Some(v) => window.push(v),
                None => continue 'windows,
            }
        }
        candidates.push(CandidateMatch {
            start,
            end: start + probe.len() - 1,
            distance: metric.distance(&window, probe),
        });
    }

    Ok(candidates)
}

//! Missingness reporting for a series.

use crate::gaps::detect_gaps;
use crate::series::TimeSeries;

/// Missing-data profile of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MissingSummary {
    /// Total number of positions.
    pub len: usize,
    /// Number of missing positions.
    pub n_missing: usize,
    /// Fraction of positions missing (0 for an empty series).
    pub missing_ratio: f64,
    /// Number of maximal missing runs.
    pub n_gaps: usize,
    /// Number of gaps of length exactly 1.
    ///
    /// A nonzero count means [`fill_singleton_gaps`](crate::fill_singleton_gaps)
    /// should run before [`impute`](crate::impute).
    pub n_singleton_gaps: usize,
    /// Length of the longest gap (0 when there are none).
    pub longest_gap: usize,
}

/// Summarize the missing data in a series.
pub fn missing_summary(series: &TimeSeries) -> MissingSummary {
    let gaps = detect_gaps(series.values());

    let len = series.len();
    let n_missing: usize = gaps.iter().map(|gap| gap.len).sum();
    let missing_ratio = if len == 0 {
        0.0
    } else {
        n_missing as f64 / len as f64
    };

    MissingSummary {
        len,
        n_missing,
        missing_ratio,
        n_gaps: gaps.len(),
        n_singleton_gaps: gaps.iter().filter(|gap| gap.len == 1).count(),
        longest_gap: gaps.iter().map(|gap| gap.len).max().unwrap_or(0),
    }
}

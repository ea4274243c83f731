//! Gap imputation for evenly spaced time series.
//!
//! Missing runs ("gaps") are filled by partial subsequence matching: for
//! each gap, the values adjacent to it act as probes to locate the most
//! similar fully-present windows elsewhere in the series, and the values
//! adjacent to the two best matches are blended into the gap. Short gaps
//! are resolved first so that their filled values become search context
//! for the longer ones.
//!
//! Single-point gaps are a precondition of the matching path, not part of
//! it: run [`fill_singleton_gaps`] first, then [`impute`]. The simpler
//! whole-series strategies in [`fills`] are available as baselines.

pub mod error;
pub mod fills;
pub mod gaps;
pub mod imputation;
pub mod matcher;
pub mod series;
pub mod summary;
pub mod weighting;

// Re-exports for convenience
pub use error::{ImputeError, Result};
pub use fills::{fill_backward, fill_constant, fill_forward, fill_interpolate, fill_mean};
pub use gaps::{detect_gaps, Gap};
pub use imputation::{fill_singleton_gaps, impute, impute_with};
pub use matcher::{
    subsequence_distances, subsequence_distances_with, CandidateMatch, DistanceMetric, Euclidean,
    Manhattan,
};
pub use series::TimeSeries;
pub use summary::{missing_summary, MissingSummary};
pub use weighting::{BlendWeighting, MeanWeighting, Weighting};

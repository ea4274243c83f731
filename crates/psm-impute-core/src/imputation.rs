//! Gap imputation by partial subsequence matching.
//!
//! For each gap the values adjacent to it act as probes: the closest
//! fully-present window to each probe is located elsewhere in the series,
//! and the values adjacent to the matched windows are blended into the gap.
//! See <https://doi.org/10.1007/s11269-022-03408-6>.

use std::cmp::Ordering;

use crate::error::Result;
use crate::gaps::{detect_gaps, is_missing, present, Gap};
use crate::matcher::{subsequence_distances_with, CandidateMatch, DistanceMetric, Euclidean};
use crate::series::TimeSeries;
use crate::weighting::{MeanWeighting, Weighting};

/// Fill interior single-point gaps with the mean of their two neighbors.
///
/// Only positions whose both immediate neighbors are present are filled;
/// longer runs and missing values at the series boundary are left
/// untouched. Run this before [`impute`] whenever single-point gaps are
/// present: probe construction degenerates to point comparisons for
/// length-1 gaps and is not supported on that path.
pub fn fill_singleton_gaps(series: &TimeSeries) -> TimeSeries {
    let mut values = series.values().to_vec();

    for pos in 1..values.len().saturating_sub(1) {
        if !is_missing(&values[pos]) {
            continue;
        }
        if let (Some(prev), Some(next)) = (present(&values[pos - 1]), present(&values[pos + 1])) {
            values[pos] = Some((prev + next) / 2.0);
        }
    }

    series.with_values(values)
}

/// Impute missing values by partial subsequence matching, with the default
/// Euclidean metric and elementwise-mean weighting.
///
/// Returns a filled copy; the input series is not modified. Gaps for which
/// no acceptable match exists on either side are left unresolved rather
/// than reported as errors.
pub fn impute(series: &TimeSeries) -> Result<TimeSeries> {
    impute_with(series, &Euclidean, &MeanWeighting)
}

/// Impute missing values by partial subsequence matching with a
/// caller-supplied distance metric and weighting function.
///
/// Gaps are processed shortest first so that values filled early become
/// search context for the longer gaps that follow; gaps of equal length
/// keep their position order. For a gap of length `n`, the `n` values on
/// each side form probes, and the `n` values adjacent to the closest
/// acceptable window for each probe (following it on the left search,
/// preceding it on the right search) are combined by `weighting` and
/// written into the gap. If only one side produces a substitute it is
/// combined with itself; if neither does, the gap stays missing.
pub fn impute_with<D, W>(series: &TimeSeries, metric: &D, weighting: &W) -> Result<TimeSeries>
where
    D: DistanceMetric,
    W: Weighting,
{
    let mut values = series.values().to_vec();

    let mut gaps = detect_gaps(&values);
    gaps.sort_by_key(|gap| gap.len); // stable: equal lengths keep position order

    for gap in &gaps {
        let left = left_substitute(&values, gap, metric)?;
        let right = right_substitute(&values, gap, metric)?;

        let (left, right) = match (left, right) {
            (None, None) => continue,
            (Some(segment), None) => (segment.clone(), segment),
            (None, Some(segment)) => (segment.clone(), segment),
            (Some(left), Some(right)) => (left, right),
        };

        let filled = weighting.combine(&left, &right);
        for (offset, value) in filled.into_iter().enumerate() {
            values[gap.start + offset] = Some(value);
        }
    }

    Ok(series.with_values(values))
}

/// The fully-present run of `len` values starting at `start`, or `None` if
/// the range leaves the series or contains a missing value.
fn present_run(values: &[Option<f64>], start: usize, len: usize) -> Option<Vec<f64>> {
    let end = start.checked_add(len)?;
    if end > values.len() {
        return None;
    }
    values[start..end].iter().map(present).collect()
}

/// All candidate windows for `probe`, ranked ascending by distance.
/// The sort is stable, so equal distances keep source order.
fn ranked_candidates<D: DistanceMetric>(
    values: &[Option<f64>],
    probe: &[f64],
    metric: &D,
) -> Result<Vec<CandidateMatch>> {
    let mut candidates = subsequence_distances_with(values, probe, metric)?;
    candidates.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    Ok(candidates)
}

/// Search left of the gap: probe the `n` values before the gap, then take
/// the `n` values immediately following the closest acceptable window.
fn left_substitute<D: DistanceMetric>(
    values: &[Option<f64>],
    gap: &Gap,
    metric: &D,
) -> Result<Option<Vec<f64>>> {
    let n = gap.len;
    let Some(probe_start) = gap.start.checked_sub(n) else {
        return Ok(None);
    };
    let Some(probe) = present_run(values, probe_start, n) else {
        return Ok(None);
    };

    for candidate in ranked_candidates(values, &probe, metric)? {
        if let Some(segment) = present_run(values, candidate.end + 1, n) {
            return Ok(Some(segment));
        }
    }
    Ok(None)
}

/// Search right of the gap: probe the `n` values after the gap, then take
/// the `n` values immediately preceding the closest acceptable window.
fn right_substitute<D: DistanceMetric>(
    values: &[Option<f64>],
    gap: &Gap,
    metric: &D,
) -> Result<Option<Vec<f64>>> {
    let n = gap.len;
    let probe_start = gap.end + 1;
    if probe_start + n > values.len() {
        return Ok(None);
    }
    let Some(probe) = present_run(values, probe_start, n) else {
        return Ok(None);
    };

    for candidate in ranked_candidates(values, &probe, metric)? {
        let Some(segment_start) = candidate.start.checked_sub(n) else {
            continue;
        };
        if let Some(segment) = present_run(values, segment_start, n) {
            return Ok(Some(segment));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Manhattan;
    use crate::weighting::BlendWeighting;

    const HOUR: i64 = 3_600_000_000;

    fn hourly(values: Vec<Option<f64>>) -> TimeSeries {
        let timestamps = (0..values.len() as i64).map(|i| i * HOUR).collect();
        TimeSeries::with_frequency(timestamps, values, HOUR).unwrap()
    }

    fn from_f64(values: &[f64]) -> Vec<Option<f64>> {
        values
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect()
    }

    /// Two periods of 1..9, hourly.
    fn periodic() -> Vec<f64> {
        let mut values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
        let period = values.clone();
        values.extend(period);
        values
    }

    #[test]
    fn test_fill_singleton_gaps() {
        let series = hourly(from_f64(&[1.0, f64::NAN, 3.0, f64::NAN, f64::NAN, 6.0]));
        let filled = fill_singleton_gaps(&series);

        // The interior singleton gets the neighbor mean, the length-2 run
        // and everything else stays as it was.
        assert_eq!(
            filled.values(),
            &[Some(1.0), Some(2.0), Some(3.0), None, None, Some(6.0)]
        );
    }

    #[test]
    fn test_fill_singleton_gaps_leaves_boundary_alone() {
        let series = hourly(vec![None, Some(2.0), Some(3.0), None]);
        let filled = fill_singleton_gaps(&series);
        assert_eq!(filled.values(), series.values());
    }

    #[test]
    fn test_noop_on_complete_series() {
        let series = hourly(from_f64(&periodic()));
        let imputed = impute(&series).unwrap();
        assert_eq!(imputed, series);
    }

    #[test]
    fn test_recovers_periodic_series_with_multi_gap() {
        let expected = periodic();
        let mut values = expected.clone();
        for v in &mut values[3..6] {
            *v = f64::NAN;
        }

        let series = hourly(from_f64(&values));
        let imputed = impute(&fill_singleton_gaps(&series)).unwrap();

        assert_eq!(imputed.len(), expected.len());
        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_recovers_periodic_series_with_single_missing_point() {
        let expected = periodic();
        let mut values = expected.clone();
        values[3] = f64::NAN;

        let series = hourly(from_f64(&values));
        let imputed = impute(&fill_singleton_gaps(&series)).unwrap();

        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_recovers_gap_with_multiple_candidate_sources() {
        let nan = f64::NAN;
        let expected = [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, //
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 19.0, 9.0, //
            1.0, 2.0, 0.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
        ];
        let with_gap = [
            1.0, 2.0, 3.0, nan, nan, nan, 7.0, 8.0, 9.0, //
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 19.0, 9.0, //
            1.0, 2.0, 0.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
        ];

        let series = hourly(from_f64(&with_gap));
        let imputed = impute(&fill_singleton_gaps(&series)).unwrap();

        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_front_edge_gap_uses_right_probe_only() {
        let nan = f64::NAN;
        let expected = periodic();
        let with_gap = [
            1.0, 2.0, nan, nan, nan, 6.0, 7.0, 8.0, 9.0, //
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
        ];

        let series = hourly(from_f64(&with_gap));
        let imputed = impute(&fill_singleton_gaps(&series)).unwrap();

        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_back_edge_gap_uses_left_probe_only() {
        let nan = f64::NAN;
        let expected = periodic();
        let with_gap = [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, //
            1.0, 2.0, 3.0, 4.0, 5.0, nan, nan, nan, 9.0,
        ];

        let series = hourly(from_f64(&with_gap));
        let imputed = impute(&fill_singleton_gaps(&series)).unwrap();

        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_shorter_gaps_fill_first_and_feed_longer_gaps() {
        // Three periods of 1..9 with a length-1 gap (position 12) inside
        // the range the length-3 gap's left search will want to copy from.
        // The short gap must resolve first for that source to be usable.
        let nan = f64::NAN;
        let mut expected: Vec<f64> = periodic();
        expected.extend((1..=9).map(|v| v as f64));
        let mut values = expected.clone();
        values[3] = nan;
        values[4] = nan;
        values[5] = nan;
        values[12] = nan;

        let series = hourly(from_f64(&values));
        let imputed = impute(&series).unwrap();

        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_equal_length_gaps_are_processed_in_position_order() {
        // Both gaps have length 2, so only the stable tie-break puts the
        // earlier gap first. The first gap blends [28, 38] and [32, 42]
        // into [30, 40], a pair that exists nowhere else; the second gap's
        // probe [30, 40] then matches it exactly at [2, 3] and copies the
        // following [50, 60]. With the order inverted, positions 2..4 are
        // still missing and the second gap would settle for the
        // approximate match at [9, 10] and fill [77, 88] instead.
        let nan = f64::NAN;
        let values = [
            10.0, 20.0, nan, nan, 50.0, 60.0, //
            9.0, 10.0, 20.0, 28.0, 38.0, 77.0, 88.0, //
            5.0, 32.0, 42.0, 50.0, 60.0, 7.0, 8.0, //
            30.0, 40.0, nan, nan,
        ];

        let series = hourly(from_f64(&values));
        let imputed = impute(&series).unwrap();

        let expected = [
            10.0, 20.0, 30.0, 40.0, 50.0, 60.0, //
            9.0, 10.0, 20.0, 28.0, 38.0, 77.0, 88.0, //
            5.0, 32.0, 42.0, 50.0, 60.0, 7.0, 8.0, //
            30.0, 40.0, 50.0, 60.0,
        ];
        assert_eq!(imputed.values(), from_f64(&expected).as_slice());
    }

    #[test]
    fn test_unresolvable_gap_is_left_missing() {
        // No room for a probe on either side: the gap stays, the call
        // still succeeds.
        let series = hourly(vec![Some(1.0), None, None, Some(4.0)]);
        let imputed = impute(&series).unwrap();
        assert_eq!(imputed.values(), series.values());

        let all_missing = hourly(vec![None, None, None, None]);
        let imputed = impute(&all_missing).unwrap();
        assert_eq!(imputed.values(), all_missing.values());
    }

    #[test]
    fn test_imputation_is_idempotent() {
        let mut values = periodic();
        for v in &mut values[3..6] {
            *v = f64::NAN;
        }

        let series = hourly(from_f64(&values));
        let once = impute(&series).unwrap();
        let twice = impute(&once).unwrap();

        assert!(once.is_complete());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_injected_metric_and_weighting() {
        // A fully left-weighted blend must reproduce the left substitute
        // exactly; Manhattan ranking agrees with Euclidean on this data.
        let nan = f64::NAN;
        let mut values = periodic();
        values[3] = nan;
        values[4] = nan;
        values[5] = nan;

        let series = hourly(from_f64(&values));
        let imputed = impute_with(&series, &Manhattan, &BlendWeighting::new(1.0)).unwrap();

        assert_eq!(imputed.values(), from_f64(&periodic()).as_slice());
    }
}

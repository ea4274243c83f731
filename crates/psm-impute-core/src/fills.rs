//! Baseline whole-series fill strategies.
//!
//! The simple alternatives to subsequence matching: each strategy fills
//! what it can derive and leaves the rest missing, so they compose with
//! gap detection and [`impute`](crate::impute) on the same series type.

use crate::gaps::present;
use crate::series::TimeSeries;

/// Fill every missing value with a constant.
pub fn fill_constant(series: &TimeSeries, fill_value: f64) -> TimeSeries {
    let values = series
        .values()
        .iter()
        .map(|v| Some(present(v).unwrap_or(fill_value)))
        .collect();
    series.with_values(values)
}

/// Fill missing values with the last observed value (forward fill / LOCF).
///
/// Positions before the first observation stay missing.
pub fn fill_forward(series: &TimeSeries) -> TimeSeries {
    let mut last = None;
    let values = series
        .values()
        .iter()
        .map(|v| match present(v) {
            Some(x) => {
                last = Some(x);
                last
            }
            None => last,
        })
        .collect();
    series.with_values(values)
}

/// Fill missing values with the next observed value (backward fill / NOCB).
///
/// Positions after the last observation stay missing.
pub fn fill_backward(series: &TimeSeries) -> TimeSeries {
    let mut next = None;
    let mut values = vec![None; series.len()];

    for (pos, v) in series.values().iter().enumerate().rev() {
        values[pos] = match present(v) {
            Some(x) => {
                next = Some(x);
                next
            }
            None => next,
        };
    }

    series.with_values(values)
}

/// Fill missing values with the mean of the observed values.
///
/// A series with no observed values is returned unchanged.
pub fn fill_mean(series: &TimeSeries) -> TimeSeries {
    let observed: Vec<f64> = series.values().iter().filter_map(present).collect();
    if observed.is_empty() {
        return series.clone();
    }
    let mean = observed.iter().sum::<f64>() / observed.len() as f64;

    let values = series
        .values()
        .iter()
        .map(|v| Some(present(v).unwrap_or(mean)))
        .collect();
    series.with_values(values)
}

/// Fill missing values by linear interpolation between the surrounding
/// observed values.
///
/// Positions before the first or after the last observation stay missing.
pub fn fill_interpolate(series: &TimeSeries) -> TimeSeries {
    let mut values = series.values().to_vec();

    let mut prev: Option<(usize, f64)> = None;
    for pos in 0..values.len() {
        let Some(v) = present(&values[pos]) else {
            continue;
        };
        if let Some((prev_pos, prev_val)) = prev {
            let span = pos - prev_pos;
            if span > 1 {
                let slope = (v - prev_val) / span as f64;
                for step in 1..span {
                    values[prev_pos + step] = Some(prev_val + slope * step as f64);
                }
            }
        }
        prev = Some((pos, v));
    }

    series.with_values(values)
}

//! Evenly spaced time series container.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::{ImputeError, Result};
use crate::gaps::is_missing;

/// Convert microseconds since epoch to NaiveDateTime.
fn micros_to_datetime(micros: i64) -> NaiveDateTime {
    let secs = micros / 1_000_000;
    let nsecs = ((micros % 1_000_000) * 1000) as u32;
    chrono::DateTime::from_timestamp(secs, nsecs)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

/// Convert NaiveDateTime to microseconds since epoch.
fn datetime_to_micros(dt: NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_micros()
}

/// An evenly spaced time series with explicitly missing values.
///
/// Values are aligned by position with their timestamps (`i64` microseconds
/// since epoch); `None` marks a missing observation. The spacing between
/// consecutive timestamps is fixed for the whole series and validated at
/// construction, so every consumer can do plain integer position arithmetic
/// instead of timestamp arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<i64>,
    values: Vec<Option<f64>>,
    frequency: i64,
    positions: HashMap<i64, usize>,
}

impl TimeSeries {
    /// Build a series from microsecond timestamps and values, inferring the
    /// frequency from the first step.
    ///
    /// # Errors
    /// * `InvalidFrequency` if there are fewer than 2 points or the spacing
    ///   varies
    /// * `InvalidInput` if the arrays differ in length
    /// * `InvalidIndex` if the timestamps are not strictly increasing
    pub fn new(timestamps: Vec<i64>, values: Vec<Option<f64>>) -> Result<Self> {
        if timestamps.len() < 2 {
            return Err(ImputeError::InvalidFrequency(
                "cannot infer a frequency from fewer than 2 points".to_string(),
            ));
        }
        let frequency = timestamps[1] - timestamps[0];
        Self::with_frequency(timestamps, values, frequency)
    }

    /// Build a series with an explicitly known frequency in microseconds.
    ///
    /// Unlike [`TimeSeries::new`], degenerate series of length 0 or 1 are
    /// accepted since no spacing has to be inferred.
    pub fn with_frequency(
        timestamps: Vec<i64>,
        values: Vec<Option<f64>>,
        frequency: i64,
    ) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ImputeError::InvalidInput(format!(
                "timestamps and values must have the same length ({} vs {})",
                timestamps.len(),
                values.len()
            )));
        }

        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ImputeError::InvalidIndex(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        if frequency <= 0 {
            return Err(ImputeError::InvalidFrequency(
                "frequency must be positive".to_string(),
            ));
        }

        for pair in timestamps.windows(2) {
            let step = pair[1] - pair[0];
            if step != frequency {
                return Err(ImputeError::InvalidFrequency(format!(
                    "expected a fixed spacing of {} microseconds, found {}",
                    frequency, step
                )));
            }
        }

        let positions = timestamps
            .iter()
            .enumerate()
            .map(|(pos, &ts)| (ts, pos))
            .collect();

        Ok(Self {
            timestamps,
            values,
            frequency,
            positions,
        })
    }

    /// Build a series from calendar datetimes, inferring the frequency.
    pub fn from_datetimes(dates: &[NaiveDateTime], values: Vec<Option<f64>>) -> Result<Self> {
        let timestamps = dates.iter().map(|dt| datetime_to_micros(*dt)).collect();
        Self::new(timestamps, values)
    }

    /// Number of positions in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fixed spacing between consecutive timestamps, in microseconds.
    pub fn frequency(&self) -> i64 {
        self.frequency
    }

    /// Timestamps as microseconds since epoch, aligned with [`values`].
    ///
    /// [`values`]: TimeSeries::values
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// The series values; `None` marks a missing observation.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// O(1) lookup of the position holding `timestamp`.
    pub fn position_of(&self, timestamp: i64) -> Option<usize> {
        self.positions.get(&timestamp).copied()
    }

    /// Timestamp at `position`, if within bounds.
    pub fn timestamp_at(&self, position: usize) -> Option<i64> {
        self.timestamps.get(position).copied()
    }

    /// The series timestamps as calendar datetimes.
    pub fn datetimes(&self) -> Vec<NaiveDateTime> {
        self.timestamps
            .iter()
            .map(|&ts| micros_to_datetime(ts))
            .collect()
    }

    /// Whether every position holds a present, comparable value.
    pub fn is_complete(&self) -> bool {
        !self.values.iter().any(is_missing)
    }

    /// Rebuild a series over the same timestamp grid with new values.
    ///
    /// The grid invariants were validated when `self` was constructed and
    /// are unaffected by a value change, so no revalidation happens here.
    pub(crate) fn with_values(&self, values: Vec<Option<f64>>) -> TimeSeries {
        debug_assert_eq!(values.len(), self.values.len());
        TimeSeries {
            timestamps: self.timestamps.clone(),
            values,
            frequency: self.frequency,
            positions: self.positions.clone(),
        }
    }
}

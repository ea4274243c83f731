//! Gap detection over a series of optional values.

/// A maximal contiguous run of missing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// First missing position.
    pub start: usize,
    /// Last missing position (inclusive).
    pub end: usize,
    /// Number of missing positions in the run.
    pub len: usize,
}

/// The value at a position if it is present and comparable (not NaN).
pub fn present(value: &Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Whether a value counts as missing (absent or NaN).
pub fn is_missing(value: &Option<f64>) -> bool {
    present(value).is_none()
}

/// Scan a series and report every maximal run of missing values in
/// ascending position order.
///
/// A run still open at the end of the series is closed at the last
/// position. A series without missing values yields an empty vector.
pub fn detect_gaps(values: &[Option<f64>]) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut run_start: Option<usize> = None;

    for (pos, value) in values.iter().enumerate() {
        match (is_missing(value), run_start) {
            (true, None) => run_start = Some(pos),
            (false, Some(start)) => {
                gaps.push(Gap {
                    start,
                    end: pos - 1,
                    len: pos - start,
                });
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        let end = values.len() - 1;
        gaps.push(Gap {
            start,
            end,
            len: end - start + 1,
        });
    }

    gaps
}

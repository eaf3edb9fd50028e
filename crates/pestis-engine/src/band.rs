//! Row-band partitioning.
//!
//! A band is a contiguous, non-overlapping run of grid rows assigned to
//! one worker for a step. Bands tile the grid exactly and differ in
//! height by at most one row.

use std::ops::Range;

use smallvec::SmallVec;

/// One contiguous slice of grid rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Band {
    /// Position of this band in the partition (0-based, top to bottom).
    pub index: usize,
    /// Rows covered, half-open.
    pub rows: Range<u32>,
}

impl Band {
    /// Number of rows in the band.
    pub fn height(&self) -> u32 {
        self.rows.end - self.rows.start
    }
}

/// Split `height` rows into `count` bands.
///
/// `count` is clamped to `[1, height]` so that no band is empty. Band `k`
/// covers rows `[k * height / count, (k + 1) * height / count)`.
///
/// # Examples
///
/// ```
/// use pestis_engine::partition_rows;
///
/// let bands = partition_rows(10, 4);
/// let heights: Vec<u32> = bands.iter().map(|b| b.height()).collect();
/// assert_eq!(heights, [2, 3, 2, 3]);
/// assert_eq!(bands[3].rows, 7..10);
/// ```
pub fn partition_rows(height: u32, count: usize) -> SmallVec<[Band; 16]> {
    let count = count.clamp(1, height.max(1) as usize) as u64;
    let height = u64::from(height);
    (0..count)
        .map(|k| Band {
            index: k as usize,
            rows: (k * height / count) as u32..((k + 1) * height / count) as u32,
        })
        .collect()
}

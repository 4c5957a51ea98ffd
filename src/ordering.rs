//! Ordering of records along a splitting axis, used during tree construction.

use crate::record::{Axis, CityRecord};

/// Stable sort of `records` by their coordinate along `axis`.
///
/// Ties keep their original relative order, which makes construction deterministic for a given
/// input order.
#[inline]
pub fn sort_by_axis(records: &mut [CityRecord], axis: Axis) {
    records.sort_by(|a, b| a.coord(axis).total_cmp(&b.coord(axis)));
}

/// Position of the median in a sorted slice of `len` items: the upper median for even lengths.
#[inline]
pub(crate) fn median_position(len: usize) -> usize {
    len / 2
}

/// Sort `records` along `axis` and return the record at index `len / 2`.
///
/// The slice is reordered in place, so callers hand over a buffer whose order they no longer need.
/// Returns `None` for an empty slice.
pub fn select_median(records: &mut [CityRecord], axis: Axis) -> Option<&CityRecord> {
    sort_by_axis(records, axis);
    records.get(median_position(records.len()))
}

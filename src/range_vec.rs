//! [`RangeVec`](struct.RangeVec.html) keeps the same set of non-overlapping ranges as
//! [`RangeTree`](crate::RangeTree), but in a vector sorted by start.
//!
//! Searches are a binary search on the starts. Since stored ranges never overlap, the lowest
//! range overlapping a query is either the last one starting before the query or the first one
//! starting inside it, so at most two ranges are inspected. Inserting and removing shift the tail
//! of the vector, which makes this the simple baseline to measure the tree against.
//!
//! ```rust
//!    use rangetree::{Range, RangeStore, RangeVec};
//!
//!    let mut ranges = RangeVec::new(0, 100).unwrap();
//!    assert!(ranges.insert(40, 10));
//!    assert!(ranges.insert(0, 10));
//!    assert!(!ranges.insert(45, 10));
//!    assert_eq!(ranges.find(5, 40), Some(Range::new(0, 10)));
//!    assert_eq!(ranges.iter().collect::<Vec<&Range>>(), vec![&Range::new(0, 10), &Range::new(40, 10)]);
//! ```
use crate::error::Error;
use crate::range::Range;
use crate::rangestore::{admit, bounds, RangeStore};
use log::{debug, trace};
use std::cmp;

/// Sorted vector of non-overlapping ranges in a fixed domain
#[derive(Debug, Clone)]
pub struct RangeVec {
    /// Stored ranges, ascending by start
    ranges: Vec<Range>,
    begin: i32,
    end: i32,
}

impl RangeVec {
    /// Determine the index of the first range starting at or after `start` via a binary search.
    #[inline]
    pub fn lower_bound(start: i64, ranges: &[Range]) -> usize {
        let mut size = ranges.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let other_half = size - half;
            let probe = low + half;
            let other_low = low + other_half;
            let v = &ranges[probe];
            size = half;
            low = if i64::from(v.start) < start {
                other_low
            } else {
                low
            }
        }
        low
    }

    /// Index of the lowest stored range overlapping [start, stop)
    fn locate(&self, start: i64, stop: i64) -> Option<usize> {
        let idx = Self::lower_bound(start, &self.ranges);
        if idx > 0 && self.ranges[idx - 1].overlap(start, stop) {
            Some(idx - 1)
        } else if idx < self.ranges.len() && self.ranges[idx].overlap(start, stop) {
            Some(idx)
        } else {
            None
        }
    }

    /// The stored ranges as a sorted slice
    #[inline]
    pub fn as_slice(&self) -> &[Range] {
        &self.ranges
    }
}

impl<'a> RangeStore<'a> for RangeVec {
    type RangeIterator = IterRangeVec<'a>;

    fn new(begin: i32, end: i32) -> Result<Self, Error> {
        bounds(begin, end)?;
        Ok(RangeVec {
            ranges: Vec::new(),
            begin,
            end,
        })
    }

    #[inline]
    fn begin(&self) -> i32 {
        self.begin
    }

    #[inline]
    fn end(&self) -> i32 {
        self.end
    }

    #[inline]
    fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[inline]
    fn iter(&'a self) -> IterRangeVec<'a> {
        IterRangeVec {
            inner: self,
            pos: 0,
        }
    }

    #[inline]
    fn check(&self, start: i32, length: u32) -> bool {
        match admit(self.begin, self.end, start, length) {
            Ok((start, stop)) => self.locate(start, stop).is_none(),
            Err(_) => false,
        }
    }

    #[inline]
    fn find(&self, position: i32, length: u32) -> Option<Range> {
        let start = i64::from(position);
        let stop = start + i64::from(cmp::max(length, 1));
        self.locate(start, stop).map(|idx| self.ranges[idx])
    }

    fn try_insert(&mut self, start: i32, length: u32) -> Result<(), Error> {
        let (lo, hi) = admit(self.begin, self.end, start, length).map_err(|e| {
            trace!("rejected insert: {}", e);
            e
        })?;
        if let Some(idx) = self.locate(lo, hi) {
            let e = Error::Overlap {
                start,
                length,
                existing: self.ranges[idx],
            };
            trace!("rejected insert: {}", e);
            return Err(e);
        }
        let range = Range::new(start, length);
        let idx = Self::lower_bound(lo, &self.ranges);
        self.ranges.insert(idx, range);
        debug!("inserted {} at index {}", range, idx);
        Ok(())
    }

    fn remove(&mut self, position: i32) -> Result<Range, Error> {
        if position < self.begin || position >= self.end {
            trace!("rejected remove: position {} outside domain", position);
            return Err(Error::InvalidPosition(position));
        }
        match self.locate(i64::from(position), i64::from(position) + 1) {
            Some(idx) => {
                let range = self.ranges.remove(idx);
                debug!("removed {} from index {}", range, idx);
                Ok(range)
            }
            None => {
                trace!("rejected remove: nothing at {}", position);
                Err(Error::NotFound(position))
            }
        }
    }
}

/// RangeVec Iterator
#[derive(Debug)]
pub struct IterRangeVec<'a> {
    inner: &'a RangeVec,
    pos: usize,
}

impl<'a> Iterator for IterRangeVec<'a> {
    type Item = &'a Range;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.inner.ranges.get(self.pos)?;
        self.pos += 1;
        Some(range)
    }
}

impl IntoIterator for RangeVec {
    type Item = Range;
    type IntoIter = ::std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a> IntoIterator for &'a RangeVec {
    type Item = &'a Range;
    type IntoIter = std::slice::Iter<'a, Range>;

    fn into_iter(self) -> std::slice::Iter<'a, Range> {
        self.ranges.iter()
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    fn setup_spaced() -> RangeVec {
        let mut ranges = RangeVec::new(0, 100).unwrap();
        for start in (0..100).step_by(20) {
            assert!(ranges.insert(start, 10));
        }
        ranges
    }

    #[test]
    fn test_lower_bound() {
        let ranges = vec![Range::new(0, 5), Range::new(10, 5), Range::new(20, 5)];
        assert_eq!(RangeVec::lower_bound(-3, &ranges), 0);
        assert_eq!(RangeVec::lower_bound(0, &ranges), 0);
        assert_eq!(RangeVec::lower_bound(1, &ranges), 1);
        assert_eq!(RangeVec::lower_bound(20, &ranges), 2);
        assert_eq!(RangeVec::lower_bound(21, &ranges), 3);
        assert_eq!(RangeVec::lower_bound(5, &[]), 0);
    }

    // Test that a query stop that hits a range start returns no range
    #[test]
    fn test_query_stop_range_start() {
        let ranges = setup_spaced();
        assert_eq!(None, ranges.find(15, 5));
        assert!(ranges.check(15, 5));
    }

    // Test that a query start that hits a range stop returns no range
    #[test]
    fn test_query_start_range_stop() {
        let ranges = setup_spaced();
        assert_eq!(None, ranges.find(30, 5));
        assert!(ranges.check(30, 5));
    }

    // Test that a query that overlaps the start of a range returns that range
    #[test]
    fn test_query_overlaps_range_start() {
        let ranges = setup_spaced();
        assert_eq!(Some(Range::new(20, 10)), ranges.find(15, 10));
        assert!(!ranges.check(15, 10));
    }

    // Test that a query that is enveloped by a range returns the range
    #[test]
    fn test_range_envelops_query() {
        let ranges = setup_spaced();
        assert_eq!(Some(Range::new(20, 10)), ranges.find(22, 5));
    }

    // Test that a query that envelops several ranges returns the lowest
    #[test]
    fn test_query_envelops_ranges() {
        let ranges = setup_spaced();
        assert_eq!(Some(Range::new(20, 10)), ranges.find(15, 50));
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut ranges = RangeVec::new(0, 100).unwrap();
        for &start in [50, 10, 90, 30, 70].iter() {
            assert!(ranges.insert(start, 5));
        }
        let starts: Vec<i32> = ranges.iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![10, 30, 50, 70, 90]);
        assert!(!ranges.insert(95, 10));
        assert_eq!(ranges.try_insert(0, 0), Err(Error::EmptyRange { start: 0 }));
        assert_eq!(ranges.len(), 5);
    }

    #[test]
    fn test_remove() {
        let mut ranges = setup_spaced();
        assert_eq!(ranges.remove(100), Err(Error::InvalidPosition(100)));
        assert_eq!(ranges.remove(15), Err(Error::NotFound(15)));
        assert_eq!(ranges.remove(29), Ok(Range::new(20, 10)));
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges.find(25, 1), None);
        let owned: Vec<Range> = ranges.into_iter().collect();
        assert_eq!(owned.len(), 4);
    }
}

use std::cmp::Ordering::{self};
use std::fmt;

/// Represent an occupied range from [start, start + length)
/// Inclusive start, exclusive of stop
#[derive(Debug, Clone, Copy, Hash)]
pub struct Range {
    pub start: i32,
    pub length: u32,
}

impl Range {
    #[inline]
    pub fn new(start: i32, length: u32) -> Self {
        Range { start, length }
    }

    /// Exclusive end of the range. Widened so that `start + length` never overflows.
    #[inline]
    pub fn stop(&self) -> i64 {
        i64::from(self.start) + i64::from(self.length)
    }

    /// Check if a single position falls inside the range
    #[inline]
    pub fn contains(&self, position: i32) -> bool {
        self.start <= position && i64::from(position) < self.stop()
    }

    /// Check if the range overlaps [start, stop)
    #[inline]
    pub fn overlap(&self, start: i64, stop: i64) -> bool {
        i64::from(self.start) < stop && self.stop() > start
    }

    /// Compute the intersect between two ranges, for instance how much of a requested range is
    /// already taken by the stored range `find` reports.
    /// ```
    /// use rangetree::{Range, RangeStore, RangeTree};
    /// let mut tree = RangeTree::new(0, 100).unwrap();
    /// tree.insert(20, 10);
    /// let wanted = Range::new(25, 10);
    /// let taken = tree.find(wanted.start, wanted.length).unwrap();
    /// assert_eq!(wanted.intersect(&taken), 5);
    /// assert_eq!(wanted.intersect(&Range::new(35, 5)), 0);
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Range) -> u32 {
        let shared = std::cmp::min(self.stop(), other.stop())
            - std::cmp::max(i64::from(self.start), i64::from(other.start));
        if shared > 0 {
            shared as u32
        } else {
            0
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.stop())
    }
}

impl Ord for Range {
    #[inline]
    fn cmp(&self, other: &Range) -> Ordering {
        if self.start < other.start {
            Ordering::Less
        } else if other.start < self.start {
            Ordering::Greater
        } else {
            self.length.cmp(&other.length)
        }
    }
}
impl Eq for Range {}

impl PartialOrd for Range {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Range {
    #[inline]
    fn eq(&self, other: &Range) -> bool {
        self.start == other.start && self.length == other.length
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
    use super::*;

    #[test]
    fn test_range_intersects() {
        let r1 = Range::new(70, 50);
        let r2 = Range::new(10, 5);
        let r3 = Range::new(10, 5); // exact overlap
        let r4 = Range::new(12, 3); // inner overlap
        let r5 = Range::new(14, 2); // overlap end
        let r6 = Range::new(40, 10);
        let r7 = Range::new(50, 5);
        let r8 = Range::new(60, 5);
        let r9 = Range::new(68, 3); // overlap start
        let r10 = Range::new(70, 5);

        assert_eq!(r2.intersect(&r3), 5); // exact match
        assert_eq!(r2.intersect(&r4), 3); // inner intersect
        assert_eq!(r2.intersect(&r5), 1); // end intersect
        assert_eq!(r9.intersect(&r10), 1); // start intersect
        assert_eq!(r7.intersect(&r8), 0); // no intersect
        assert_eq!(r6.intersect(&r7), 0); // no intersect stop = start
        assert_eq!(r1.intersect(&r10), 5); // inner intersect at start
    }

    #[test]
    fn test_range_overlap_is_half_open() {
        let r = Range::new(100, 300);
        assert!(r.overlap(80, 110));
        assert!(r.overlap(390, 420));
        assert!(!r.overlap(50, 100)); // query stop hits range start
        assert!(!r.overlap(400, 430)); // query start hits range stop
    }

    #[test]
    fn test_range_contains() {
        let r = Range::new(-5, 10);
        assert!(r.contains(-5));
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert!(!r.contains(-6));
    }

    #[test]
    fn test_range_stop_does_not_overflow() {
        let r = Range::new(i32::MAX, u32::MAX);
        assert_eq!(r.stop(), i64::from(i32::MAX) + i64::from(u32::MAX));
        assert!(r.contains(i32::MAX));
    }

    #[test]
    fn test_range_ordering_and_display() {
        let mut ranges = vec![Range::new(30, 9), Range::new(-10, 2), Range::new(30, 1)];
        ranges.sort();
        assert_eq!(ranges, vec![Range::new(-10, 2), Range::new(30, 1), Range::new(30, 9)]);
        assert_eq!(Range::new(100, 4).to_string(), "[100, 104)");
    }
}

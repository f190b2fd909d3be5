use crate::error::Error;
use crate::range::Range;

/// Common surface of the stores of non-overlapping ranges in a fixed domain [begin, end).
pub trait RangeStore<'a> {
    type RangeIterator: Iterator<Item = &'a Range>;

    // functions that must be implemented
    fn new(begin: i32, end: i32) -> Result<Self, Error>
    where
        Self: Sized;
    fn begin(&self) -> i32;
    fn end(&self) -> i32;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn iter(&'a self) -> Self::RangeIterator;
    fn check(&self, start: i32, length: u32) -> bool;
    fn find(&self, position: i32, length: u32) -> Option<Range>;
    fn try_insert(&mut self, start: i32, length: u32) -> Result<(), Error>;
    fn remove(&mut self, position: i32) -> Result<Range, Error>;

    /// Insert a range, reporting only whether it was placed.
    #[inline]
    fn insert(&mut self, start: i32, length: u32) -> bool {
        self.try_insert(start, length).is_ok()
    }
}

/// Validate a candidate against the domain, returning its half-open bounds widened to i64.
#[inline]
pub(crate) fn admit(begin: i32, end: i32, start: i32, length: u32) -> Result<(i64, i64), Error> {
    if length == 0 {
        return Err(Error::EmptyRange { start });
    }
    let stop = i64::from(start) + i64::from(length);
    if start < begin || stop > i64::from(end) {
        return Err(Error::OutOfBounds { start, length });
    }
    Ok((i64::from(start), stop))
}

/// Validate domain bounds at construction.
#[inline]
pub(crate) fn bounds(begin: i32, end: i32) -> Result<(), Error> {
    if begin > end {
        return Err(Error::InvalidBounds { begin, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit() {
        assert_eq!(admit(0, 8000, 100, 300), Ok((100, 400)));
        assert_eq!(admit(0, 8000, 7700, 300), Ok((7700, 8000)));
        assert_eq!(
            admit(0, 8000, 7800, 300),
            Err(Error::OutOfBounds { start: 7800, length: 300 })
        );
        assert_eq!(
            admit(0, 8000, -5, 300),
            Err(Error::OutOfBounds { start: -5, length: 300 })
        );
        assert_eq!(admit(0, 8000, 10, 0), Err(Error::EmptyRange { start: 10 }));
    }

    #[test]
    fn test_bounds() {
        assert!(bounds(0, 0).is_ok());
        assert!(bounds(-10, 10).is_ok());
        assert_eq!(bounds(5, 4), Err(Error::InvalidBounds { begin: 5, end: 4 }));
    }
}

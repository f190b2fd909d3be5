use crate::range::Range;
use thiserror::Error;

/// Reasons a store rejects a request. A rejected request never changes the store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid bounds: begin {begin} is greater than end {end}")]
    InvalidBounds { begin: i32, end: i32 },
    #[error("empty range at {start}")]
    EmptyRange { start: i32 },
    #[error("range starting at {start} with length {length} is outside the domain")]
    OutOfBounds { start: i32, length: u32 },
    #[error("range starting at {start} with length {length} overlaps {existing}")]
    Overlap {
        start: i32,
        length: u32,
        existing: Range,
    },
    #[error("position {0} is outside the domain")]
    InvalidPosition(i32),
    #[error("no range contains position {0}")]
    NotFound(i32),
}

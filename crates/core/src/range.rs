//! Inclusive byte ranges for bounded reads
//!
//! Ranges follow HTTP semantics: both ends inclusive, an end past the last
//! byte clamps to it, a start at or past the object length is unsatisfiable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A contiguous byte span `[start, end]`, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Create a span, rejecting one whose end precedes its start
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidArgument(format!(
                "range end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First `count` bytes of an object, `[0, count - 1]`
    pub fn first(count: u64) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidArgument("range cannot be empty".into()));
        }
        Ok(Self {
            start: 0,
            end: count - 1,
        })
    }

    /// Number of bytes the span covers
    pub const fn byte_count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Fit the span to an object of `object_len` bytes
    ///
    /// The end clamps to the last byte; a start at or past the end of the
    /// object cannot be satisfied.
    pub fn clamp_to_len(&self, object_len: u64) -> Result<ByteRange> {
        if self.start >= object_len {
            return Err(Error::RangeNotSatisfiable(format!(
                "range starts at byte {} but the object is {object_len} bytes",
                self.start
            )));
        }
        Ok(ByteRange {
            start: self.start,
            end: self.end.min(object_len - 1),
        })
    }

    /// Wire form used in an HTTP `Range` header
    pub fn to_header(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ByteRange {
    type Err = Error;

    /// Parse the `START-END` form used on the command line
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s.split_once('-').ok_or_else(|| {
            Error::InvalidArgument(format!("range must look like START-END, got {s:?}"))
        })?;
        let start = start
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::InvalidArgument(format!("invalid range start {start:?}")))?;
        let end = end
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::InvalidArgument(format!("invalid range end {end:?}")))?;
        ByteRange::new(start, end)
    }
}

//! Bucket and key validation
//!
//! Malformed addressing is a caller bug and is rejected as
//! `InvalidArgument` before any network round trip.

use crate::error::{Error, Result};

/// Longest object key accepted by S3-compatible stores
pub const MAX_KEY_LEN: usize = 1024;

/// Validate a bucket name
///
/// Follows the portable subset of S3 naming rules: 3-63 characters,
/// lowercase letters, digits, `-` and `.`, starting and ending with a
/// letter or digit.
pub fn validate_bucket(bucket: &str) -> Result<()> {
    if bucket.len() < 3 || bucket.len() > 63 {
        return Err(Error::InvalidArgument(format!(
            "bucket name must be 3-63 characters, got {} in {bucket:?}",
            bucket.len()
        )));
    }
    if !bucket
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(Error::InvalidArgument(format!(
            "bucket name may only contain lowercase letters, digits, '-' and '.', got {bucket:?}"
        )));
    }
    let edges_valid = bucket.chars().next().is_some_and(is_alnum)
        && bucket.chars().next_back().is_some_and(is_alnum);
    if !edges_valid {
        return Err(Error::InvalidArgument(format!(
            "bucket name must start and end with a letter or digit, got {bucket:?}"
        )));
    }
    Ok(())
}

/// Validate an object key
///
/// Keys are free-form UTF-8 paths; only emptiness and the store's length
/// cap are rejected here.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("object key cannot be empty".into()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(Error::InvalidArgument(format!(
            "object key exceeds {MAX_KEY_LEN} bytes"
        )));
    }
    Ok(())
}

fn is_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

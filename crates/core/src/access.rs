//! Write gating for mutation operations
//!
//! `put` and `delete` are the only side-effecting operations and must be
//! opted into separately from reads, so a caller that is "just browsing"
//! cannot destroy data. The mode is fixed when the handle is built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether a handle may mutate the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMode {
    /// Listing, metadata probes, and reads only
    #[default]
    ReadOnly,
    /// Reads plus `put` and `delete`
    ReadWrite,
}

impl AccessMode {
    /// Gate a mutating operation, naming it in the error
    pub fn require_write(&self, operation: &str) -> Result<()> {
        match self {
            AccessMode::ReadWrite => Ok(()),
            AccessMode::ReadOnly => Err(Error::AccessDenied(format!(
                "{operation} requires a read-write handle"
            ))),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::ReadOnly => write!(f, "read-only"),
            AccessMode::ReadWrite => write!(f, "read-write"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_rejects_writes() {
        let err = AccessMode::ReadOnly.require_write("put").unwrap_err();
        assert!(matches!(err, Error::AccessDenied(_)));
        assert!(err.to_string().contains("put"));
    }

    #[test]
    fn test_read_write_allows_writes() {
        assert!(AccessMode::ReadWrite.require_write("delete").is_ok());
    }

    #[test]
    fn test_default_is_read_only() {
        assert_eq!(AccessMode::default(), AccessMode::ReadOnly);
    }

    #[test]
    fn test_display() {
        assert_eq!(AccessMode::ReadOnly.to_string(), "read-only");
        assert_eq!(AccessMode::ReadWrite.to_string(), "read-write");
    }
}

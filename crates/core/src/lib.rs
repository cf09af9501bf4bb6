//! scout-core: the object-store browsing engine contract
//!
//! This crate provides everything a caller needs to browse an S3-like
//! store in bounded chunks, including:
//! - The `ObjectBrowser` trait: list / head / read / put / delete
//! - The error taxonomy callers make retry decisions from
//! - Byte-range, key, and access-mode primitives
//! - Environment configuration and retry/timeout tunables
//! - An in-memory reference backend for tests and offline work
//!
//! This crate is independent of any specific S3 SDK. The intended calling
//! convention is three phases: discover with listing pages, sample with
//! head probes and small range reads, then deep-read only the keys that
//! survived sampling. Each phase is cheap and independently invokable; the
//! engine does not enforce the ordering.

pub mod access;
pub mod config;
pub mod error;
pub mod key;
pub mod memory;
pub mod range;
pub mod traits;

pub use access::AccessMode;
pub use config::{RetryConfig, ScoutConfig, TimeoutConfig};
pub use error::{Error, Result};
pub use memory::MemoryBrowser;
pub use range::ByteRange;
pub use traits::{
    ListPage, ListRequest, MAX_PAGE_SIZE, ObjectBrowser, ObjectMetadata, ObjectSummary,
    ReadOutput, list_all,
};

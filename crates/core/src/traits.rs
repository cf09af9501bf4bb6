//! ObjectBrowser trait definition
//!
//! The five-operation browsing interface over an S3-like store. It keeps
//! the CLI decoupled from any specific SDK and lets callers run a cheap
//! discover -> sample -> deep-read pass over a large bucket without the
//! engine ever materializing a full namespace or object in memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::range::ByteRange;

/// Hard cap on listing page size, and the default when none is given
pub const MAX_PAGE_SIZE: i32 = 1000;

/// One object in a listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Full key within the bucket
    pub key: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Last modified timestamp, when the store reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Object metadata from a head probe; no content is transferred
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Content length in bytes
    pub content_length: u64,

    /// MIME content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,

    /// ETag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Parameters for one listing page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest {
    /// Only keys starting with this prefix
    pub prefix: Option<String>,

    /// Opaque cursor returned by the previous page
    pub token: Option<String>,

    /// Page size cap, defaults to [`MAX_PAGE_SIZE`]
    pub limit: Option<i32>,
}

impl ListRequest {
    /// Page size to request, validated against `1..=MAX_PAGE_SIZE`
    pub fn effective_limit(&self) -> Result<i32> {
        match self.limit {
            None => Ok(MAX_PAGE_SIZE),
            Some(n) if (1..=MAX_PAGE_SIZE).contains(&n) => Ok(n),
            Some(n) => Err(Error::InvalidArgument(format!(
                "page limit must be between 1 and {MAX_PAGE_SIZE}, got {n}"
            ))),
        }
    }
}

/// One page of a prefix-bounded scan, in the store's own key order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    /// Objects on this page
    pub objects: Vec<ObjectSummary>,

    /// Cursor for the next page; `None` when the scan is exhausted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListPage {
    /// Whether more pages exist
    pub fn is_truncated(&self) -> bool {
        self.next_token.is_some()
    }
}

/// Bytes returned by a read, plus the length actually served
#[derive(Debug, Clone)]
pub struct ReadOutput {
    /// Object content, or the requested span of it
    pub body: Vec<u8>,

    /// Effective content length; smaller than the requested span when the
    /// read reached end-of-object
    pub content_length: u64,
}

/// The browsing interface over an S3-compatible store
///
/// Every call is stateless and addresses exactly one (bucket, key) pair or
/// one (bucket, prefix) scan; pagination state lives entirely in the token
/// handed back to the caller. Implementations classify every failure into
/// [`Error`] and gate `put`/`delete` behind their access mode. This trait
/// is implemented by the S3 adapter and the in-memory backend, and can be
/// mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectBrowser: Send + Sync {
    /// List one page of keys under a prefix, in the store's listing order
    async fn list(&self, bucket: &str, request: ListRequest) -> Result<ListPage>;

    /// Fetch metadata for one object without transferring content
    async fn head(&self, bucket: &str, key: &str) -> Result<ObjectMetadata>;

    /// Read object content; exactly the given span when a range is set
    async fn read(
        &self,
        bucket: &str,
        key: &str,
        range: Option<ByteRange>,
    ) -> Result<ReadOutput>;

    /// Write an object, replacing any previous content (last writer wins)
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()>;

    /// Remove an object; succeeds even when the key is already absent
    async fn delete(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Drain every page of a scan into one vector
///
/// For callers that genuinely need the full namespace. Page fetches stay
/// sequential, so the store sees at most one outstanding listing call.
pub async fn list_all(
    browser: &dyn ObjectBrowser,
    bucket: &str,
    prefix: Option<&str>,
    page_size: Option<i32>,
) -> Result<Vec<ObjectSummary>> {
    let mut objects = Vec::new();
    let mut token = None;
    loop {
        let page = browser
            .list(
                bucket,
                ListRequest {
                    prefix: prefix.map(str::to_owned),
                    token,
                    limit: page_size,
                },
            )
            .await?;
        objects.extend(page.objects);
        match page.next_token {
            Some(next) => token = Some(next),
            None => return Ok(objects),
        }
    }
}

//! In-memory reference backend
//!
//! A BTreeMap-backed [`ObjectBrowser`] for tests and offline development.
//! Buckets are created explicitly so missing-bucket behavior matches a real
//! store, and continuation tokens follow the same strictly-after resumption
//! rule as S3 continuation tokens.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::access::AccessMode;
use crate::error::{Error, Result};
use crate::key::{validate_bucket, validate_key};
use crate::range::ByteRange;
use crate::traits::{
    ListPage, ListRequest, ObjectBrowser, ObjectMetadata, ObjectSummary, ReadOutput,
};

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    content_type: Option<String>,
    last_modified: jiff::Timestamp,
    etag: String,
}

type Objects = BTreeMap<String, StoredObject>;

/// An [`ObjectBrowser`] held entirely in process memory
pub struct MemoryBrowser {
    buckets: RwLock<BTreeMap<String, Objects>>,
    access: AccessMode,
    writes: AtomicU64,
}

impl MemoryBrowser {
    pub fn new(access: AccessMode) -> Self {
        Self {
            buckets: RwLock::new(BTreeMap::new()),
            access,
            writes: AtomicU64::new(0),
        }
    }

    /// Create a bucket; operations on buckets never created return `NotFound`
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        validate_bucket(bucket)?;
        self.buckets
            .write()
            .await
            .entry(bucket.to_owned())
            .or_default();
        Ok(())
    }

    fn next_etag(&self) -> String {
        format!("{:016x}", self.writes.fetch_add(1, Ordering::Relaxed))
    }
}

fn bucket_of<'a>(buckets: &'a BTreeMap<String, Objects>, bucket: &str) -> Result<&'a Objects> {
    buckets
        .get(bucket)
        .ok_or_else(|| Error::NotFound(format!("bucket {bucket} does not exist")))
}

fn object_of<'a>(objects: &'a Objects, bucket: &str, key: &str) -> Result<&'a StoredObject> {
    objects
        .get(key)
        .ok_or_else(|| Error::NotFound(format!("{bucket}/{key} does not exist")))
}

#[async_trait]
impl ObjectBrowser for MemoryBrowser {
    async fn list(&self, bucket: &str, request: ListRequest) -> Result<ListPage> {
        validate_bucket(bucket)?;
        let limit = request.effective_limit()? as usize;
        let prefix = request.prefix.as_deref().unwrap_or("");

        let buckets = self.buckets.read().await;
        let objects = bucket_of(&buckets, bucket)?;

        // BTreeMap iteration is already lexicographic; resume strictly
        // after the token, then take one page worth of matching keys.
        let mut page = Vec::new();
        let mut next_token = None;
        for (key, stored) in objects.iter() {
            if let Some(token) = &request.token {
                if key.as_str() <= token.as_str() {
                    continue;
                }
            }
            if !key.starts_with(prefix) {
                continue;
            }
            if page.len() == limit {
                next_token = page.last().map(|last: &ObjectSummary| last.key.clone());
                break;
            }
            page.push(ObjectSummary {
                key: key.clone(),
                size_bytes: stored.body.len() as u64,
                last_modified: Some(stored.last_modified),
                etag: Some(stored.etag.clone()),
            });
        }

        Ok(ListPage {
            objects: page,
            next_token,
        })
    }

    async fn head(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        validate_bucket(bucket)?;
        validate_key(key)?;

        let buckets = self.buckets.read().await;
        let stored = object_of(bucket_of(&buckets, bucket)?, bucket, key)?;
        Ok(ObjectMetadata {
            content_length: stored.body.len() as u64,
            content_type: stored.content_type.clone(),
            last_modified: Some(stored.last_modified),
            etag: Some(stored.etag.clone()),
        })
    }

    async fn read(
        &self,
        bucket: &str,
        key: &str,
        range: Option<ByteRange>,
    ) -> Result<ReadOutput> {
        validate_bucket(bucket)?;
        validate_key(key)?;

        let buckets = self.buckets.read().await;
        let stored = object_of(bucket_of(&buckets, bucket)?, bucket, key)?;
        let body = match range {
            Some(range) => {
                let span = range.clamp_to_len(stored.body.len() as u64)?;
                stored.body[span.start as usize..=span.end as usize].to_vec()
            }
            None => stored.body.clone(),
        };
        let content_length = body.len() as u64;
        Ok(ReadOutput {
            body,
            content_length,
        })
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        self.access.require_write("put")?;
        validate_bucket(bucket)?;
        validate_key(key)?;

        let etag = self.next_etag();
        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Error::NotFound(format!("bucket {bucket} does not exist")))?;
        objects.insert(
            key.to_owned(),
            StoredObject {
                body,
                content_type,
                last_modified: jiff::Timestamp::now(),
                etag,
            },
        );
        Ok(())
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.access.require_write("delete")?;
        validate_bucket(bucket)?;
        validate_key(key)?;

        let mut buckets = self.buckets.write().await;
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Error::NotFound(format!("bucket {bucket} does not exist")))?;
        // Removing an absent key is deliberately not an error.
        objects.remove(key);
        Ok(())
    }
}

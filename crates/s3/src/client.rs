//! S3 backend
//!
//! Wraps aws-sdk-s3 and implements the ObjectBrowser trait from
//! scout-core. One [`S3Browser`] is built per configured target and reused
//! across all operations; every call is an independent round trip.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use scout_core::key::{validate_bucket, validate_key};
use scout_core::{
    AccessMode, ByteRange, Error, ListPage, ListRequest, ObjectBrowser, ObjectMetadata,
    ObjectSummary, ReadOutput, Result, RetryConfig, ScoutConfig, TimeoutConfig,
};

use crate::classify::classify;
use crate::retry::with_retry;

/// Pre-resolved static credentials
///
/// When unset, the SDK's default provider chain runs (environment,
/// profiles, IMDS); resolving credentials is otherwise not this crate's
/// concern.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Connection settings for [`S3Browser::connect`]
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Store region
    pub region: String,

    /// Custom endpoint; set for MinIO/LocalStack style deployments and
    /// implies path-style addressing
    pub endpoint_url: Option<String>,

    /// Static credentials override
    pub credentials: Option<StaticCredentials>,

    /// Whether mutations are allowed on this handle
    pub access: AccessMode,

    /// Retry tuning for transient transport failures
    pub retry: RetryConfig,

    /// Timeout bounds applied to every call
    pub timeout: TimeoutConfig,
}

impl BrowserOptions {
    /// Connection settings from resolved startup configuration, with
    /// default retry and timeout tuning
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self {
            region: config.region.clone(),
            endpoint_url: config.endpoint_url.clone(),
            credentials: None,
            access: config.access,
            retry: RetryConfig::default(),
            timeout: TimeoutConfig::default(),
        }
    }
}

/// S3 implementation of the browsing engine
pub struct S3Browser {
    inner: aws_sdk_s3::Client,
    access: AccessMode,
    retry: RetryConfig,
}

impl S3Browser {
    /// Build the SDK client and wrap it
    ///
    /// SDK-level retries are disabled in favor of the engine's own loop;
    /// connect and per-attempt timeouts bound every call so one hung read
    /// cannot block unrelated work.
    pub async fn connect(options: BrowserOptions) -> Self {
        let timeouts = aws_config::timeout::TimeoutConfig::builder()
            .connect_timeout(Duration::from_millis(options.timeout.connect_ms))
            .operation_attempt_timeout(Duration::from_millis(options.timeout.attempt_ms))
            .build();

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(options.region.clone()))
            .retry_config(aws_config::retry::RetryConfig::disabled())
            .timeout_config(timeouts);

        if let Some(credentials) = &options.credentials {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                credentials.access_key.clone(),
                credentials.secret_key.clone(),
                None,
                None,
                "scout-static-credentials",
            ));
        }

        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.endpoint_url.is_some())
            .build();

        Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            access: options.access,
            retry: options.retry,
        }
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectBrowser for S3Browser {
    async fn list(&self, bucket: &str, request: ListRequest) -> Result<ListPage> {
        validate_bucket(bucket)?;
        let limit = request.effective_limit()?;
        let location = format!("{bucket}/{}", request.prefix.as_deref().unwrap_or(""));
        tracing::debug!(bucket, prefix = ?request.prefix, limit, "list objects");

        // No delimiter: scans are flat, and ordering is whatever the store
        // returns (lexicographic for S3). Results are never reordered.
        let response = with_retry(&self.retry, "list", || async {
            let mut call = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .max_keys(limit);
            if let Some(prefix) = &request.prefix {
                call = call.prefix(prefix);
            }
            if let Some(token) = &request.token {
                call = call.continuation_token(token);
            }
            call.send()
                .await
                .map_err(|err| classify("list", &location, &err))
        })
        .await?;

        let objects = response
            .contents()
            .iter()
            .map(|object| ObjectSummary {
                key: object.key().unwrap_or_default().to_string(),
                size_bytes: object.size().unwrap_or(0).max(0) as u64,
                last_modified: object.last_modified().and_then(timestamp_from),
                etag: object.e_tag().map(trim_etag),
            })
            .collect();

        Ok(ListPage {
            objects,
            next_token: response.next_continuation_token().map(str::to_string),
        })
    }

    async fn head(&self, bucket: &str, key: &str) -> Result<ObjectMetadata> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        let location = format!("{bucket}/{key}");
        tracing::debug!(bucket, key, "head object");

        let response = with_retry(&self.retry, "head", || async {
            self.inner
                .head_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|err| classify("head", &location, &err))
        })
        .await?;

        Ok(ObjectMetadata {
            content_length: response.content_length().unwrap_or(0).max(0) as u64,
            content_type: response.content_type().map(str::to_string),
            last_modified: response.last_modified().and_then(timestamp_from),
            etag: response.e_tag().map(trim_etag),
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
        let location = format!("{bucket}/{key}");
        tracing::debug!(bucket, key, range = ?range, "get object");

        // When a range is set, exactly that span is requested; the store
        // clamps an end past the last byte and rejects a start past it.
        // The whole attempt is retried as a unit, so a partially collected
        // body is never reused.
        let body = with_retry(&self.retry, "read", || async {
            let mut call = self.inner.get_object().bucket(bucket).key(key);
            if let Some(range) = &range {
                call = call.range(range.to_header());
            }
            let response = call
                .send()
                .await
                .map_err(|err| classify("read", &location, &err))?;
            response
                .body
                .collect()
                .await
                .map(|data| data.into_bytes().to_vec())
                .map_err(|err| Error::Transport(format!("read {location}: {err}")))
        })
        .await?;

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
        let location = format!("{bucket}/{key}");
        tracing::debug!(bucket, key, bytes = body.len(), "put object");

        with_retry(&self.retry, "put", || async {
            // Each attempt needs its own copy; the stream is consumed on send.
            let mut call = self
                .inner
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(ByteStream::from(body.clone()));
            if let Some(content_type) = &content_type {
                call = call.content_type(content_type);
            }
            call.send()
                .await
                .map(|_| ())
                .map_err(|err| classify("put", &location, &err))
        })
        .await
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.access.require_write("delete")?;
        validate_bucket(bucket)?;
        validate_key(key)?;
        let location = format!("{bucket}/{key}");
        tracing::debug!(bucket, key, "delete object");

        with_retry(&self.retry, "delete", || async {
            match self
                .inner
                .delete_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
            {
                Ok(_) => Ok(()),
                // S3 itself reports success for an absent key; some
                // compatible stores answer NoSuchKey instead. Fold that
                // case so delete stays idempotent everywhere.
                Err(SdkError::ServiceError(ctx)) if ctx.err().code() == Some("NoSuchKey") => {
                    Ok(())
                }
                Err(err) => Err(classify("delete", &location, &err)),
            }
        })
        .await
    }
}

fn timestamp_from(modified: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(modified.secs()).ok()
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_conversion() {
        let modified = aws_smithy_types::DateTime::from_secs(1_700_000_000);
        let stamp = timestamp_from(&modified).unwrap();
        assert_eq!(stamp.as_second(), 1_700_000_000);
    }

    #[test]
    fn test_etag_quotes_are_trimmed() {
        assert_eq!(trim_etag("\"abc123\""), "abc123");
        assert_eq!(trim_etag("abc123"), "abc123");
    }

    #[test]
    fn test_options_from_config() {
        let config = ScoutConfig::from_lookup(|name| match name {
            "AWS_REGION" => Some("eu-west-1".into()),
            "SCOUT_ENDPOINT_URL" => Some("http://localhost:9000".into()),
            _ => None,
        })
        .unwrap();

        let options = BrowserOptions::from_config(&config);
        assert_eq!(options.region, "eu-west-1");
        assert_eq!(options.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(options.access, AccessMode::ReadOnly);
        assert_eq!(options.retry.max_attempts, 3);
        assert!(options.credentials.is_none());
    }
}

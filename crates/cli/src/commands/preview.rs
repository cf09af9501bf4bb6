//! preview command - Show the first bytes of an object
//!
//! The cheap look before a full read: fetches exactly the first N bytes
//! with a range request, never the whole object. Shorter objects come
//! back whole because the span is clamped server-side.

use clap::Args;
use scout_core::{ByteRange, ObjectBrowser};
use serde::Serialize;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Show the first bytes of an object
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Object key to sample
    pub key: String,

    /// Number of leading bytes to fetch
    #[arg(short = 'n', long, default_value_t = 256)]
    pub bytes: u64,
}

#[derive(Debug, Serialize)]
struct PreviewOutput {
    key: String,
    sampled_bytes: u64,
    /// Sample decoded as UTF-8, with invalid sequences replaced
    body: String,
}

/// Execute the preview command
pub async fn execute(args: PreviewArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let bucket = match ctx.bucket() {
        Ok(bucket) => bucket.to_string(),
        Err(err) => return formatter.fail(&err),
    };

    let browser = ctx.connect().await;
    run(&browser, &bucket, &args, &ctx.output).await
}

async fn run(
    browser: &dyn ObjectBrowser,
    bucket: &str,
    args: &PreviewArgs,
    output: &OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output.clone());

    let range = match ByteRange::first(args.bytes) {
        Ok(range) => range,
        Err(err) => return formatter.fail(&err),
    };

    match browser.read(bucket, &args.key, Some(range)).await {
        Ok(read) => {
            let body = String::from_utf8_lossy(&read.body);
            if formatter.is_json() {
                formatter.json(&PreviewOutput {
                    key: args.key.clone(),
                    sampled_bytes: read.content_length,
                    body: body.into_owned(),
                });
            } else {
                formatter.println(&body);
            }
            ExitCode::Success
        }
        Err(err) => formatter.fail(&err),
    }
}

#[cfg(test)]
mod tests {
    use scout_core::{AccessMode, MemoryBrowser};

    use super::*;

    fn quiet() -> OutputConfig {
        OutputConfig {
            quiet: true,
            ..Default::default()
        }
    }

    async fn seeded() -> MemoryBrowser {
        let browser = MemoryBrowser::new(AccessMode::ReadWrite);
        browser.create_bucket("review-docs").await.unwrap();
        browser
            .put("review-docs", "docs/a.txt", vec![b'x'; 1000], None)
            .await
            .unwrap();
        browser
    }

    #[tokio::test]
    async fn test_run_samples_leading_bytes() {
        let browser = seeded().await;
        let args = PreviewArgs {
            key: "docs/a.txt".to_string(),
            bytes: 256,
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_clamps_past_object_length() {
        let browser = seeded().await;
        let args = PreviewArgs {
            key: "docs/a.txt".to_string(),
            bytes: 1_000_000,
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_rejects_zero_bytes() {
        let browser = seeded().await;
        let args = PreviewArgs {
            key: "docs/a.txt".to_string(),
            bytes: 0,
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
    }

    #[tokio::test]
    async fn test_run_maps_missing_key() {
        let browser = seeded().await;
        let args = PreviewArgs {
            key: "docs/missing.txt".to_string(),
            bytes: 256,
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::NotFound);
    }
}

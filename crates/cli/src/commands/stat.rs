//! stat command - Show object metadata
//!
//! Probes one or more keys without reading their bodies. Probes run
//! concurrently but results print in argument order.

use clap::Args;
use futures::StreamExt;
use scout_core::{ObjectBrowser, ObjectMetadata};
use serde::Serialize;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// In-flight metadata probes when several keys are given
const PROBE_CONCURRENCY: usize = 4;

/// Show object metadata
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Object key(s) to probe
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize)]
struct StatOutput {
    key: String,
    content_length: u64,
    size_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

/// Execute the stat command
pub async fn execute(args: StatArgs, ctx: &Context) -> ExitCode {
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
    args: &StatArgs,
    output: &OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output.clone());

    let probes: Vec<_> = futures::stream::iter(&args.keys)
        .map(|key| async move { (key.as_str(), browser.head(bucket, key).await) })
        .buffered(PROBE_CONCURRENCY)
        .collect()
        .await;

    let mut worst = ExitCode::Success;

    for (index, (key, result)) in probes.into_iter().enumerate() {
        match result {
            Ok(meta) => {
                if formatter.is_json() {
                    formatter.json(&describe(key, &meta));
                } else {
                    if index > 0 {
                        formatter.println("");
                    }
                    print_human(&formatter, key, &meta);
                }
            }
            Err(err) => {
                let code = formatter.fail(&err);
                if worst == ExitCode::Success {
                    worst = code;
                }
            }
        }
    }

    worst
}

fn describe(key: &str, meta: &ObjectMetadata) -> StatOutput {
    StatOutput {
        key: key.to_string(),
        content_length: meta.content_length,
        size_human: humansize::format_size(meta.content_length, humansize::BINARY),
        content_type: meta.content_type.clone(),
        last_modified: meta.last_modified.map(|ts| ts.to_string()),
        etag: meta.etag.clone(),
    }
}

fn print_human(formatter: &Formatter, key: &str, meta: &ObjectMetadata) {
    formatter.println(&format!("Key       : {key}"));
    if let Some(modified) = meta.last_modified {
        formatter.println(&format!(
            "Date      : {} UTC",
            modified.strftime("%Y-%m-%d %H:%M:%S")
        ));
    }
    formatter.println(&format!(
        "Size      : {} ({} bytes)",
        humansize::format_size(meta.content_length, humansize::BINARY),
        meta.content_length
    ));
    if let Some(etag) = &meta.etag {
        formatter.println(&format!("ETag      : {etag}"));
    }
    if let Some(content_type) = &meta.content_type {
        formatter.println(&format!("Type      : {content_type}"));
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
            .put(
                "review-docs",
                "docs/a.txt",
                b"hello".to_vec(),
                Some("text/plain".to_string()),
            )
            .await
            .unwrap();
        browser
    }

    #[tokio::test]
    async fn test_run_probes_existing_key() {
        let browser = seeded().await;
        let args = StatArgs {
            keys: vec!["docs/a.txt".to_string()],
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_reports_missing_key() {
        let browser = seeded().await;
        let args = StatArgs {
            keys: vec!["docs/missing.txt".to_string()],
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_run_keeps_first_failure_code() {
        let browser = seeded().await;
        let args = StatArgs {
            keys: vec![
                "docs/missing.txt".to_string(),
                "docs/a.txt".to_string(),
                "".to_string(),
            ],
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[test]
    fn test_stat_output_json_shape() {
        let meta = ObjectMetadata {
            content_length: 5,
            content_type: Some("text/plain".to_string()),
            last_modified: None,
            etag: Some("abc123".to_string()),
        };
        insta::assert_json_snapshot!(describe("docs/a.txt", &meta), @r#"
        {
          "key": "docs/a.txt",
          "content_length": 5,
          "size_human": "5 B",
          "content_type": "text/plain",
          "etag": "abc123"
        }
        "#);
    }
}

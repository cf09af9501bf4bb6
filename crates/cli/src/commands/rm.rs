//! rm command - Remove objects
//!
//! Deletion is idempotent: removing a key that is already gone succeeds.
//! Requires a read-write handle (--allow-write).

use clap::Args;
use futures::StreamExt;
use scout_core::ObjectBrowser;
use serde::Serialize;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// In-flight deletes when several keys are given
const DELETE_CONCURRENCY: usize = 4;

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object key(s) to remove
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    status: &'static str,
    removed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed: Option<Vec<String>>,
    total: usize,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, ctx: &Context) -> ExitCode {
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
    args: &RmArgs,
    output: &OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output.clone());

    let results: Vec<_> = futures::stream::iter(&args.keys)
        .map(|key| async move { (key.as_str(), browser.delete(bucket, key).await) })
        .buffered(DELETE_CONCURRENCY)
        .collect()
        .await;

    let mut removed = Vec::new();
    let mut failed = Vec::new();
    let mut worst = ExitCode::Success;

    for (key, result) in results {
        match result {
            Ok(()) => {
                if !formatter.is_json() {
                    formatter.println(&format!("Removed: {key}"));
                }
                removed.push(key.to_string());
            }
            Err(err) => {
                let code = formatter.fail(&err);
                if worst == ExitCode::Success {
                    worst = code;
                }
                failed.push(key.to_string());
            }
        }
    }

    if formatter.is_json() {
        let total = removed.len();
        let status = if failed.is_empty() {
            "success"
        } else {
            "partial"
        };
        let failed = (!failed.is_empty()).then_some(failed);
        formatter.json(&RmOutput {
            status,
            removed,
            failed,
            total,
        });
    } else if failed.is_empty() {
        if !removed.is_empty() {
            formatter.success(&format!("Removed {} object(s).", removed.len()));
        }
    } else {
        formatter.warning(&format!(
            "Removed {} object(s); {} failed.",
            removed.len(),
            failed.len()
        ));
    }

    worst
}

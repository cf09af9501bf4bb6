//! put command - Upload a file or stdin to an object
//!
//! Writes replace whole objects; the key either appears or keeps its old
//! content. Requires a read-write handle (--allow-write).

use std::io::Read;

use anyhow::Context as _;
use clap::Args;
use scout_core::ObjectBrowser;
use serde::Serialize;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Upload a file or stdin to an object
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload, or '-' to read stdin
    pub source: String,

    /// Destination key
    pub key: String,

    /// Content type; guessed from the key's extension when omitted
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    status: &'static str,
    key: String,
    size_bytes: u64,
    size_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

/// Execute the put command
pub async fn execute(args: PutArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();

    let bucket = match ctx.bucket() {
        Ok(bucket) => bucket.to_string(),
        Err(err) => return formatter.fail(&err),
    };

    let body = match read_source(&args.source) {
        Ok(body) => body,
        Err(err) => {
            formatter.error(&format!("{err:#}"));
            return ExitCode::GeneralError;
        }
    };

    let browser = ctx.connect().await;
    run(&browser, &bucket, &args, body, &ctx.output).await
}

async fn run(
    browser: &dyn ObjectBrowser,
    bucket: &str,
    args: &PutArgs,
    body: Vec<u8>,
    output: &OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output.clone());
    let content_type = resolve_content_type(args);
    let size = body.len() as u64;

    let spinner = Spinner::new(output, &format!("uploading {}...", args.key));
    let result = browser
        .put(bucket, &args.key, body, content_type.clone())
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    status: "success",
                    key: args.key.clone(),
                    size_bytes: size,
                    size_human: humansize::format_size(size, humansize::BINARY),
                    content_type,
                });
            } else {
                formatter.success(&format!(
                    "Uploaded {} ({})",
                    args.key,
                    humansize::format_size(size, humansize::BINARY)
                ));
            }
            ExitCode::Success
        }
        Err(err) => formatter.fail(&err),
    }
}

/// Read the upload body from a local file, or stdin when source is '-'
fn read_source(source: &str) -> anyhow::Result<Vec<u8>> {
    if source == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read from stdin")?;
        return Ok(buffer);
    }

    std::fs::read(source).with_context(|| format!("failed to read {source}"))
}

fn resolve_content_type(args: &PutArgs) -> Option<String> {
    args.content_type.clone().or_else(|| {
        mime_guess::from_path(&args.key)
            .first()
            .map(|mime| mime.essence_str().to_string())
    })
}

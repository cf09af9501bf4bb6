//! cat command - Write object contents to stdout
//!
//! Raw bytes go straight to stdout so output stays pipeable; `--range`
//! fetches an exact byte span instead of the whole object.

use std::io::{self, Write};

use clap::Args;
use scout_core::{ByteRange, ObjectBrowser};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Write object contents to stdout
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Object key to read
    pub key: String,

    /// Inclusive byte span START-END (e.g. 0-1023)
    #[arg(short, long)]
    pub range: Option<ByteRange>,
}

/// Execute the cat command
pub async fn execute(args: CatArgs, ctx: &Context) -> ExitCode {
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
    args: &CatArgs,
    output: &OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output.clone());

    match browser.read(bucket, &args.key, args.range).await {
        Ok(read) => {
            // Not routed through the formatter: bytes may be binary.
            if let Err(err) = io::stdout().write_all(&read.body) {
                formatter.error(&format!("Failed to write to stdout: {err}"));
                return ExitCode::GeneralError;
            }
            tracing::debug!(key = %args.key, bytes = read.content_length, "object written");
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
            .put("review-docs", "docs/a.txt", b"hello, store".to_vec(), None)
            .await
            .unwrap();
        browser
    }

    #[tokio::test]
    async fn test_run_reads_whole_object() {
        let browser = seeded().await;
        let args = CatArgs {
            key: "docs/a.txt".to_string(),
            range: None,
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_reads_exact_span() {
        let browser = seeded().await;
        let args = CatArgs {
            key: "docs/a.txt".to_string(),
            range: Some(ByteRange::new(0, 4).unwrap()),
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_maps_unsatisfiable_range() {
        let browser = seeded().await;
        let args = CatArgs {
            key: "docs/a.txt".to_string(),
            range: Some(ByteRange::new(5000, 6000).unwrap()),
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::RangeError);
    }

    #[tokio::test]
    async fn test_run_maps_missing_key() {
        let browser = seeded().await;
        let args = CatArgs {
            key: "docs/missing.txt".to_string(),
            range: None,
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::NotFound);
    }
}

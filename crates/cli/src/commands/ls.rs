//! ls command - List objects under a prefix
//!
//! Prints one listing page by default; a truncated page ends with the
//! continuation token to resume from. `--all` drains every page instead.

use clap::Args;
use glob::Pattern;
use scout_core::{ListRequest, ObjectBrowser, ObjectSummary, list_all};
use serde::Serialize;

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// List objects under a prefix
#[derive(Args, Debug, Default)]
pub struct LsArgs {
    /// Key prefix to scan (flat; keys with '/' are not grouped)
    pub prefix: Option<String>,

    /// Maximum keys per page (1-1000)
    #[arg(short, long)]
    pub limit: Option<i32>,

    /// Continuation token from a previous truncated listing
    #[arg(short, long)]
    pub token: Option<String>,

    /// Drain every page instead of stopping after one
    #[arg(short, long, conflicts_with = "token")]
    pub all: bool,

    /// Keep only keys matching a glob pattern (applied client-side)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Summarize output (show totals)
    #[arg(long)]
    pub summarize: bool,
}

/// Output structure for ls command (JSON format)
#[derive(Debug, Serialize)]
struct LsOutput {
    objects: Vec<ObjectSummary>,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: u64,
    total_size_human: String,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, ctx: &Context) -> ExitCode {
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
    args: &LsArgs,
    output: &OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output.clone());

    let pattern = match compile_pattern(args.pattern.as_deref()) {
        Ok(pattern) => pattern,
        Err(message) => {
            formatter.error(&message);
            return ExitCode::UsageError;
        }
    };

    let (mut objects, next_token) = if args.all {
        let spinner = Spinner::new(output, "listing objects...");
        let result = list_all(browser, bucket, args.prefix.as_deref(), args.limit).await;
        spinner.finish_and_clear();
        match result {
            Ok(objects) => (objects, None),
            Err(err) => return formatter.fail(&err),
        }
    } else {
        let request = ListRequest {
            prefix: args.prefix.clone(),
            token: args.token.clone(),
            limit: args.limit,
        };
        match browser.list(bucket, request).await {
            Ok(page) => (page.objects, page.next_token),
            Err(err) => return formatter.fail(&err),
        }
    };

    if let Some(pattern) = &pattern {
        objects.retain(|object| pattern.matches(&object.key));
    }

    let total_size: u64 = objects.iter().map(|object| object.size_bytes).sum();
    let truncated = next_token.is_some();

    if formatter.is_json() {
        let output = LsOutput {
            truncated,
            next_token: next_token.clone(),
            summary: args.summarize.then(|| Summary {
                total_objects: objects.len(),
                total_size_bytes: total_size,
                total_size_human: humansize::format_size(total_size, humansize::BINARY),
            }),
            objects,
        };
        formatter.json(&output);
    } else {
        for object in &objects {
            let date = object
                .last_modified
                .map(|ts| ts.strftime("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| " ".repeat(19));
            let size = humansize::format_size(object.size_bytes, humansize::BINARY);
            formatter.println(&format!("[{date}] {size:>10} {}", object.key));
        }

        if args.summarize {
            formatter.println(&format!(
                "\nTotal: {} objects, {}",
                objects.len(),
                humansize::format_size(total_size, humansize::BINARY)
            ));
        }

        if let Some(token) = &next_token {
            formatter.println(&format!("\nMore objects; resume with --token {token}"));
        }
    }

    ExitCode::Success
}

/// Compile the optional glob pattern, rejecting malformed ones up front
fn compile_pattern(pattern: Option<&str>) -> Result<Option<Pattern>, String> {
    match pattern {
        Some(raw) => Pattern::new(raw)
            .map(Some)
            .map_err(|err| format!("Invalid pattern '{raw}': {err}")),
        None => Ok(None),
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
        for key in ["docs/a.txt", "docs/b.md", "logs/run.log"] {
            browser
                .put("review-docs", key, b"x".to_vec(), None)
                .await
                .unwrap();
        }
        browser
    }

    #[test]
    fn test_compile_pattern() {
        assert!(compile_pattern(None).unwrap().is_none());

        let pattern = compile_pattern(Some("docs/*")).unwrap().unwrap();
        assert!(pattern.matches("docs/a.txt"));
        assert!(!pattern.matches("logs/run.log"));

        assert!(compile_pattern(Some("docs/[")).is_err());
    }

    #[tokio::test]
    async fn test_run_lists_prefix() {
        let browser = seeded().await;
        let args = LsArgs {
            prefix: Some("docs/".to_string()),
            ..Default::default()
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_drains_all_pages() {
        let browser = seeded().await;
        let args = LsArgs {
            all: true,
            limit: Some(1),
            ..Default::default()
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_run_reports_missing_bucket() {
        let browser = MemoryBrowser::new(AccessMode::ReadOnly);
        let args = LsArgs::default();
        let code = run(&browser, "absent", &args, &quiet()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_run_rejects_bad_limit() {
        let browser = seeded().await;
        let args = LsArgs {
            limit: Some(0),
            ..Default::default()
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
    }

    #[tokio::test]
    async fn test_run_rejects_bad_pattern() {
        let browser = seeded().await;
        let args = LsArgs {
            pattern: Some("docs/[".to_string()),
            ..Default::default()
        };
        let code = run(&browser, "review-docs", &args, &quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
    }

    #[test]
    fn test_ls_output_json_shape() {
        let output = LsOutput {
            objects: vec![ObjectSummary {
                key: "docs/a.txt".to_string(),
                size_bytes: 11,
                last_modified: None,
                etag: Some("abc123".to_string()),
            }],
            truncated: true,
            next_token: Some("docs/a.txt".to_string()),
            summary: None,
        };
        insta::assert_json_snapshot!(output, @r#"
        {
          "objects": [
            {
              "key": "docs/a.txt",
              "size_bytes": 11,
              "etag": "abc123"
            }
          ],
          "truncated": true,
          "next_token": "docs/a.txt"
        }
        "#);
    }
}

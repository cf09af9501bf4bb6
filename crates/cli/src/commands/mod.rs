//! CLI command definitions and execution
//!
//! Each subcommand maps to one engine operation (or local introspection).
//! Commands resolve their bucket and connect a browser through the shared
//! [`Context`], then hand the actual work to a `run` function that unit
//! tests drive against an in-memory backend.

use clap::{Parser, Subcommand};
use scout_core::{AccessMode, Error, Result, ScoutConfig};
use scout_s3::{BrowserOptions, S3Browser};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod cat;
mod completions;
mod info;
mod ls;
mod preview;
mod put;
mod rm;
mod stat;

/// scout - Object store browser
///
/// Lists, inspects, and reads objects in S3-compatible storage.
/// Mutations are disabled unless explicitly allowed.
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bucket to browse (overrides SCOUT_BUCKET)
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// Store region (overrides AWS_REGION)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// S3-compatible endpoint URL (overrides SCOUT_ENDPOINT_URL)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Enable put and rm (overrides SCOUT_ALLOW_WRITE)
    #[arg(long, global = true, default_value = "false")]
    pub allow_write: bool,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List objects under a prefix
    Ls(ls::LsArgs),

    /// Show object metadata
    Stat(stat::StatArgs),

    /// Write object contents to stdout
    Cat(cat::CatArgs),

    /// Show the first bytes of an object
    Preview(preview::PreviewArgs),

    /// Upload a file or stdin to an object
    Put(put::PutArgs),

    /// Remove objects
    Rm(rm::RmArgs),

    /// Show the resolved configuration
    Info(info::InfoArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Resolved invocation context shared by the object commands
pub struct Context {
    config: ScoutConfig,
    output: OutputConfig,
}

impl Context {
    /// The bucket this invocation operates on
    fn bucket(&self) -> Result<&str> {
        self.config.bucket.as_deref().ok_or_else(|| {
            Error::Config("no bucket selected; pass --bucket or set SCOUT_BUCKET".to_string())
        })
    }

    /// Connect a browser for this invocation
    async fn connect(&self) -> S3Browser {
        S3Browser::connect(BrowserOptions::from_config(&self.config)).await
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.output.clone())
    }
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    // Completions are pure text generation; skip configuration entirely.
    let command = match cli.command {
        Commands::Completions(args) => return completions::execute(args),
        command => command,
    };

    let formatter = Formatter::new(output.clone());
    let mut config = match ScoutConfig::from_env() {
        Ok(config) => config,
        Err(err) => return formatter.fail(&err),
    };

    // Flags win over environment resolution.
    if let Some(bucket) = cli.bucket {
        config.bucket = Some(bucket);
    }
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(endpoint) = cli.endpoint_url {
        config.endpoint_url = Some(endpoint);
    }
    if cli.allow_write {
        config.access = AccessMode::ReadWrite;
    }

    let ctx = Context { config, output };

    match command {
        Commands::Ls(args) => ls::execute(args, &ctx).await,
        Commands::Stat(args) => stat::execute(args, &ctx).await,
        Commands::Cat(args) => cat::execute(args, &ctx).await,
        Commands::Preview(args) => preview::execute(args, &ctx).await,
        Commands::Put(args) => put::execute(args, &ctx).await,
        Commands::Rm(args) => rm::execute(args, &ctx).await,
        Commands::Info(args) => info::execute(args, &ctx),
        Commands::Completions(_) => unreachable!("handled above"),
    }
}

//! scout - Object store browser
//!
//! A command-line browser for S3-compatible object storage. Listing,
//! inspection, and bounded reads by default; writes are opt-in.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod exit_code;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `cat` and `completions` stay pipeable.
    let filter = if cli.debug {
        EnvFilter::new("scout=debug,scout_core=debug,scout_s3=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}

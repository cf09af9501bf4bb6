//! info command - Show the resolved configuration
//!
//! Prints what the other commands would actually run against after
//! environment resolution and flag overrides. Purely local; never
//! touches the network or credentials.

use clap::Args;

use super::Context;
use crate::exit_code::ExitCode;

/// Show the resolved configuration
#[derive(Args, Debug)]
pub struct InfoArgs {}

/// Execute the info command
pub fn execute(_args: InfoArgs, ctx: &Context) -> ExitCode {
    let formatter = ctx.formatter();
    let config = &ctx.config;

    if formatter.is_json() {
        formatter.json(config);
        return ExitCode::Success;
    }

    formatter.println(&format!("Environment : {}", config.environment));
    formatter.println(&format!(
        "Bucket      : {}",
        config.bucket.as_deref().unwrap_or("(unset)")
    ));
    formatter.println(&format!("Region      : {}", config.region));
    if let Some(model_id) = &config.model_id {
        formatter.println(&format!("Model       : {model_id}"));
    }
    if let Some(endpoint) = &config.endpoint_url {
        formatter.println(&format!("Endpoint    : {endpoint}"));
    }
    formatter.println(&format!("Access      : {}", config.access));

    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use scout_core::ScoutConfig;

    use super::*;
    use crate::output::OutputConfig;

    fn context(json: bool) -> Context {
        Context {
            config: ScoutConfig::from_lookup(|name| match name {
                "SCOUT_BUCKET" => Some("review-docs".to_string()),
                "SCOUT_MODEL_ID" => Some("runtime-7".to_string()),
                _ => None,
            })
            .unwrap(),
            output: OutputConfig {
                json,
                quiet: !json,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_execute_human() {
        assert_eq!(execute(InfoArgs {}, &context(false)), ExitCode::Success);
    }

    #[test]
    fn test_execute_json() {
        assert_eq!(execute(InfoArgs {}, &context(true)), ExitCode::Success);
    }

    #[test]
    fn test_config_json_shape() {
        let ctx = context(true);
        insta::assert_json_snapshot!(&ctx.config, @r#"
        {
          "environment": "local",
          "bucket": "review-docs",
          "region": "us-west-2",
          "model_id": "runtime-7",
          "access": "read-only"
        }
        "#);
    }
}

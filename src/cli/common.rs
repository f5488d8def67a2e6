use super::error::CliError;
use super::parser::Cli;
use crate::aws::{AwsContext, AwsSettings};
use crate::executor::{CommandRunner, LocalCommandExecutor};
use tracing::debug;

pub fn settings(cli: &Cli) -> AwsSettings {
    AwsSettings {
        profile: cli.profile.clone(),
        region: cli.region.clone(),
        environment: cli.environment.clone(),
        config_dir: cli.config_dir.clone(),
    }
}

/// Local runner with the selected profile injected as `AWS_PROFILE`.
pub fn build_runner(cli: &Cli) -> CommandRunner {
    let mut executor = LocalCommandExecutor::new();
    if let Some(profile) = &cli.profile {
        debug!("Using AWS profile '{}'", profile);
        executor = executor.with_env("AWS_PROFILE", profile.as_str());
    }
    let runner = CommandRunner::new(executor);
    if cli.quiet {
        runner.quiet()
    } else {
        runner
    }
}

/// Build the runner and resolve the caller identity in one step.
pub async fn connect(cli: &Cli) -> Result<(CommandRunner, AwsContext), CliError> {
    let mut runner = build_runner(cli);
    let ctx = AwsContext::resolve(&mut runner, settings(cli))
        .await
        .map_err(|e| {
            CliError::OperationFailed(format!("Failed to resolve AWS caller identity: {}", e))
        })?;
    Ok((runner, ctx))
}

use crate::aws::AwsError;
use crate::docker::DockerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Aws(#[from] AwsError),

    #[error(transparent)]
    Docker(#[from] DockerError),

    #[error("{0:#}")]
    Workflow(#[from] anyhow::Error),
}

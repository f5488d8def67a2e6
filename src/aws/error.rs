use crate::executor::{ExecutorError, OutputError};
use crate::util::UtilError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    // Converts `ExecutorError` -> `AwsError::Executor(err)`
    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    // Converts `OutputError` -> `AwsError::Output(err)`
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("File error: {0}")]
    File(#[from] UtilError),

    #[error("Response of '{command}' has no {field}")]
    MissingField { command: String, field: String },

    #[error("No environment set; '{0}' needs one (use --env)")]
    EnvironmentNotSet(String),
}

impl AwsError {
    pub fn missing_field(command: impl Into<String>, field: impl Into<String>) -> Self {
        AwsError::MissingField {
            command: command.into(),
            field: field.into(),
        }
    }
}

pub type AwsResult<T> = Result<T, AwsError>;

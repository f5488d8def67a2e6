use crate::executor::{ExecutorError, OutputError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DockerError {
    // Converts `ExecutorError` -> `DockerError::Executor(err)`
    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    // Converts `OutputError` -> `DockerError::Output(err)`
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

pub type DockerResult<T> = Result<T, DockerError>;

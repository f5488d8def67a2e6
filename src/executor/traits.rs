use async_trait::async_trait;

use super::{CommandResult, ExecutorError};

/// A trait for executing shell command strings in a uniform way.
#[async_trait]
pub trait CommandExecutor {
    /// Execute a command and return a `CommandResult` containing stdout/stderr/exit code.
    ///
    /// A non-zero exit code is not an error at this level; callers decide
    /// what a failure means through the runner's error policy.
    async fn execute_command(&mut self, command: &str) -> Result<CommandResult, ExecutorError>;
}

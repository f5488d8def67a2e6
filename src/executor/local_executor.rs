use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Instant;
use tokio::process::Command;

use super::error::ExecutorError;
use super::traits::CommandExecutor;
use super::types::{CommandOutput, CommandResult};

/// Runs command strings on the local machine through `sh -c`.
///
/// The whole string goes to the shell so quoted arguments such as
/// `--body 'file://…'` or `--cli-input-json '{…}'` survive intact.
#[derive(Debug)]
pub struct LocalCommandExecutor {
    shell: String,
    envs: BTreeMap<String, String>,
}

impl Default for LocalCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalCommandExecutor {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
            envs: BTreeMap::new(),
        }
    }

    /// Inject an environment variable into every child process.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl CommandExecutor for LocalCommandExecutor {
    async fn execute_command(&mut self, command: &str) -> Result<CommandResult, ExecutorError> {
        if command.trim().is_empty() {
            return Err(ExecutorError::LocalError("No command provided".to_string()));
        }

        let start_time = Instant::now();

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .envs(&self.envs)
            .output()
            .await
            .map_err(|e| ExecutorError::LocalError(format!("{}: {}", self.shell, e)))?;

        let mut cmd_output = CommandOutput::new();
        cmd_output.stdout = output.stdout;
        cmd_output.stderr = output.stderr;
        // Killed by a signal: no exit code, treat as failure.
        cmd_output.exit_code = output.status.code().unwrap_or(-1);
        cmd_output.duration = start_time.elapsed();

        tracing::debug!(
            "Local command '{}' completed with exit code {} in {:?}",
            command,
            cmd_output.exit_code,
            cmd_output.duration
        );

        Ok(CommandResult {
            command: command.to_string(),
            output: cmd_output,
        })
    }
}

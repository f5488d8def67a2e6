use colored::*;

use super::error::ExecutorError;
use super::traits::CommandExecutor;
use super::types::CommandResult;

/// What to do when a command exits with a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Turn the failure into `ExecutorError::CommandFailed`.
    #[default]
    Stop,
    /// Hand the failed result back to the caller (existence checks).
    Continue,
}

/// Executes commands, echoes them to the console and applies an `ErrorPolicy`.
pub struct CommandRunner {
    executor: Box<dyn CommandExecutor + Send>,
    echo: bool,
}

impl CommandRunner {
    pub fn new(executor: impl CommandExecutor + Send + 'static) -> Self {
        Self {
            executor: Box::new(executor),
            echo: true,
        }
    }

    /// Disable the console echo. Tracing events are still emitted.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub async fn run(
        &mut self,
        command: &str,
        policy: ErrorPolicy,
    ) -> Result<CommandResult, ExecutorError> {
        tracing::debug!(?policy, "Executing: {}", command);
        if self.echo {
            eprintln!(" ---------- [COMMAND] {} ---------- ", command);
        }

        let result = self.executor.execute_command(command).await?;

        if result.is_success() {
            self.print_result(&result, Color::Green);
            return Ok(result);
        }

        match policy {
            ErrorPolicy::Stop => {
                self.print_result(&result, Color::Red);
                let stderr = result.output.stderr_lossy();
                tracing::error!(
                    exit_code = result.output.exit_code,
                    "Command failed: '{}': {}",
                    command,
                    stderr
                );
                Err(ExecutorError::CommandFailed {
                    command: command.to_string(),
                    exit_code: result.output.exit_code,
                    stderr,
                })
            }
            ErrorPolicy::Continue => {
                self.print_result(&result, Color::Yellow);
                tracing::warn!(
                    exit_code = result.output.exit_code,
                    "Command failed, continuing: '{}'",
                    command
                );
                Ok(result)
            }
        }
    }

    fn print_result(&self, result: &CommandResult, color: Color) {
        if !self.echo {
            return;
        }
        let stdout = String::from_utf8_lossy(&result.output.stdout);
        let stderr = String::from_utf8_lossy(&result.output.stderr);
        eprintln!("{}", result.output.exit_code.to_string().color(color));
        if !stdout.trim().is_empty() {
            eprintln!("{}", stdout.trim_end().color(color));
        }
        if !stderr.trim().is_empty() {
            eprintln!("{}", stderr.trim_end().color(color));
        }
        eprintln!(" ------------------------------ ");
    }
}

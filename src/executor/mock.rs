//! Recording executor used by unit tests across the crate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{CommandExecutor, CommandResult, ExecutorError};

pub struct MockExecutor {
    responses: HashMap<String, Result<CommandResult, ExecutorError>>,
    commands: Arc<Mutex<Vec<String>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn add_response(&mut self, command: &str, result: Result<CommandResult, ExecutorError>) {
        self.responses.insert(command.to_string(), result);
    }

    pub fn add_success(&mut self, command: &str, stdout: &str) {
        let mut result = CommandResult::new(command);
        result.output.stdout = stdout.as_bytes().to_vec();
        self.add_response(command, Ok(result));
    }

    pub fn add_failure(&mut self, command: &str, exit_code: i32, stderr: &str) {
        let mut result = CommandResult::new(command);
        result.output.stderr = stderr.as_bytes().to_vec();
        result.output.exit_code = exit_code;
        self.add_response(command, Ok(result));
    }

    /// Shared handle on the commands executed so far, usable after the mock
    /// has been moved into a runner.
    pub fn history(&self) -> Arc<Mutex<Vec<String>>> {
        self.commands.clone()
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute_command(&mut self, command: &str) -> Result<CommandResult, ExecutorError> {
        self.commands.lock().unwrap().push(command.to_string());
        self.responses.get(command).cloned().ok_or_else(|| {
            ExecutorError::Other(format!("Mock response not found for command: {}", command))
        })?
    }
}

/// Snapshot of a history handle.
pub fn recorded(history: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    history.lock().unwrap().clone()
}

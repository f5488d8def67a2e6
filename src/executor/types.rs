use serde::de::DeserializeOwned;
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when processing or parsing command output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] FromUtf8Error),

    #[error("Output of '{0}' is empty")]
    EmptyOutput(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Output exceeds maximum size: {size} bytes")]
    OutputTooLarge { size: usize },
}

/// Contains the raw output (stdout/stderr), exit code, timing information, etc.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
    pub duration: Duration,
}

impl Default for CommandOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandOutput {
    const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024; // 10 MB

    pub fn new() -> Self {
        Self {
            stdout: vec![],
            stderr: vec![],
            exit_code: 0,
            duration: Duration::default(),
        }
    }

    /// Convert stdout bytes to UTF-8 string
    pub fn to_stdout_string(&self) -> Result<String, OutputError> {
        Self::decode(&self.stdout)
    }

    /// Convert stderr bytes to UTF-8 string
    pub fn to_stderr_string(&self) -> Result<String, OutputError> {
        Self::decode(&self.stderr)
    }

    /// Lossy stderr, for error messages where a decode failure must not mask the real failure.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Split stdout into lines (trim and filter out empty lines).
    pub fn stdout_lines(&self) -> Result<Vec<String>, OutputError> {
        Ok(self
            .to_stdout_string()?
            .lines()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }

    fn decode(bytes: &[u8]) -> Result<String, OutputError> {
        if bytes.len() > Self::MAX_OUTPUT_SIZE {
            return Err(OutputError::OutputTooLarge { size: bytes.len() });
        }
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// Wraps the command that was run plus its resulting output.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub command: String,
    pub output: CommandOutput,
}

impl CommandResult {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            output: CommandOutput::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.output.exit_code == 0
    }

    /// Parse stdout as JSON into a custom type
    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, OutputError> {
        if self.output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(OutputError::EmptyOutput(self.command.clone()));
        }
        serde_json::from_slice(&self.output.stdout).map_err(OutputError::JsonError)
    }

    /// Parse stdout as YAML (what `--output yaml` produces) into a custom type
    pub fn parse_yaml<T: DeserializeOwned>(&self) -> Result<T, OutputError> {
        if self.output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(OutputError::EmptyOutput(self.command.clone()));
        }
        serde_yaml::from_slice(&self.output.stdout).map_err(OutputError::YamlError)
    }
}

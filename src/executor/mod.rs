pub mod error;
pub mod local_executor;
#[cfg(test)]
pub(crate) mod mock;
pub mod runner;
pub mod traits;
pub mod types;

pub use error::ExecutorError;
pub use local_executor::LocalCommandExecutor;
pub use runner::{CommandRunner, ErrorPolicy};
pub use traits::CommandExecutor;
pub use types::{CommandOutput, CommandResult, OutputError};

mod api;
mod common;
mod docker;
mod dynamodb;
mod error;
mod identity;
mod lambda;
pub mod parser;
mod s3;
mod ui;

use clap::Parser;
pub use error::CliError;
use parser::Cli;

// Helper function to parse args
pub fn parse_args() -> Cli {
    Cli::parse()
}

// Main CLI execution function, receives parsed args
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        parser::Commands::Whoami(cmd) => cmd.run(&cli).await,
        parser::Commands::Roles(cmd) => cmd.run(&cli).await,
        parser::Commands::Api(cmd) => cmd.run(&cli).await,
        parser::Commands::Lambda(cmd) => cmd.run(&cli).await,
        parser::Commands::Dynamodb(cmd) => cmd.run(&cli).await,
        parser::Commands::S3(cmd) => cmd.run(&cli).await,
        parser::Commands::Docker(cmd) => cmd.run(&cli).await,
    }
}

use super::common::build_runner;
use super::error::CliError;
use super::parser::Cli;
use super::ui;
use crate::docker::{DockerCli, DYNAMODB_LOCAL_IMAGE};
use clap::Subcommand;
use tracing::instrument;

#[derive(Debug, Subcommand)]
pub enum DockerCommand {
    /// Check whether a container of the image is running
    Running {
        /// Image name as shown by `docker ps`
        #[arg(long, default_value = DYNAMODB_LOCAL_IMAGE)]
        image: String,
    },
}

impl DockerCommand {
    #[instrument(name = "docker", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let mut runner = build_runner(cli);
        match self {
            DockerCommand::Running { image } => {
                let running = DockerCli::new(&mut runner).is_running(image).await?;
                if running {
                    println!(
                        "{} {}",
                        ui::format_highlight(image),
                        ui::format_success("is running")
                    );
                } else {
                    println!(
                        "{} {}",
                        ui::format_highlight(image),
                        ui::format_warning("is not running")
                    );
                }
            }
        }
        Ok(())
    }
}

use super::common::connect;
use super::error::CliError;
use super::parser::Cli;
use super::ui;
use crate::aws::DynamodbCli;
use clap::Subcommand;
use tracing::{info, instrument, warn};

#[derive(Debug, Subcommand)]
pub enum DynamodbCommand {
    /// Create a table from <config-dir>/dynamodb/<table>.json
    CreateTable {
        /// Table name
        table: String,
    },

    /// Delete a table
    DeleteTable {
        /// Table name
        table: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl DynamodbCommand {
    #[instrument(name = "dynamodb", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let (mut runner, ctx) = connect(cli).await?;
        let mut dynamodb = DynamodbCli::new(&mut runner, &ctx);

        match self {
            DynamodbCommand::CreateTable { table } => {
                info!(
                    "Creating table from {}",
                    dynamodb.definition_path(table).display()
                );
                dynamodb.create_table(table).await?;
                println!(
                    "{} {}",
                    ui::format_success("Created table"),
                    ui::format_highlight(table)
                );
            }
            DynamodbCommand::DeleteTable { table, yes } => {
                warn!("This will delete table '{}' and all of its items.", table);
                let prompt = format!(
                    "Delete table {} in account {}?",
                    ui::format_highlight(table),
                    ctx.account
                );
                if !ui::confirm(&prompt, *yes)? {
                    info!("Deletion cancelled by user.");
                    return Ok(());
                }
                dynamodb.delete_table(table).await?;
                println!(
                    "{} {}",
                    ui::format_success("Deleted table"),
                    ui::format_highlight(table)
                );
            }
        }
        Ok(())
    }
}

use super::common::{build_runner, connect};
use super::error::CliError;
use super::parser::Cli;
use super::ui;
use crate::aws::list_roles;
use clap::Args;
use tabled::Tabled;
use tracing::instrument;

#[derive(Debug, Args)]
pub struct Whoami {}

impl Whoami {
    #[instrument(name = "whoami", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let (_, ctx) = connect(cli).await?;
        println!("\n{}", ui::format_header("Caller identity"));
        println!("  Account:     {}", ui::format_highlight(&ctx.account));
        println!("  ARN:         {}", ctx.arn);
        println!("  Region:      {}", ctx.region);
        println!(
            "  Profile:     {}",
            ctx.profile.as_deref().unwrap_or("(default)")
        );
        println!(
            "  Environment: {}",
            ctx.environment().unwrap_or("(not set)")
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct Roles {}

#[derive(Tabled)]
struct RoleRow<'a> {
    #[tabled(rename = "Role")]
    name: &'a str,
    #[tabled(rename = "Role ID")]
    role_id: &'a str,
    #[tabled(rename = "ARN")]
    arn: &'a str,
}

impl Roles {
    #[instrument(name = "roles", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let mut runner = build_runner(cli);
        let roles = list_roles(&mut runner).await?;
        let rows = roles
            .iter()
            .map(|(name, role)| RoleRow {
                name,
                role_id: &role.role_id,
                arn: &role.arn,
            })
            .collect();
        ui::print_table("IAM roles", rows);
        Ok(())
    }
}

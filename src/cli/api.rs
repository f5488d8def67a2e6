use super::common::connect;
use super::error::CliError;
use super::parser::Cli;
use super::ui;
use crate::aws::ApigatewayCli;
use crate::workflow;
use clap::Subcommand;
use tabled::Tabled;
use tracing::{info, instrument};

#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Create a REST API with a mock resource, deploy it to the environment and export it
    Create {
        /// API name
        name: String,
    },

    /// Re-import an API from its exported definition, redeploy and export again
    Update {
        /// API name
        name: String,
        /// REST API id (looked up by name when omitted)
        #[arg(long)]
        api_id: Option<String>,
    },

    /// Export the environment stage as an OpenAPI 3.0 YAML file
    Export {
        /// API name
        name: String,
        /// REST API id (looked up by name when omitted)
        #[arg(long)]
        api_id: Option<String>,
    },

    /// Look an API up by name and show its id and current stage deployment
    Exists {
        /// API name
        name: String,
    },

    /// Deploy an API to the environment stage
    Stage {
        /// REST API id
        api_id: String,
    },

    /// List the Lambda functions behind an API's resources
    Lambdas {
        /// REST API id
        api_id: String,
    },

    /// Create or update an API, then grant it access to its functions
    Deploy {
        /// API name
        name: String,
    },
}

#[derive(Tabled)]
struct LambdaRow {
    #[tabled(rename = "Function")]
    lambda_name: String,
    #[tabled(rename = "Resource")]
    resource_name: String,
    #[tabled(rename = "Methods")]
    methods: String,
}

async fn lookup_api_id(
    apigateway: &mut ApigatewayCli<'_>,
    name: &str,
    api_id: Option<&str>,
) -> Result<String, CliError> {
    if let Some(api_id) = api_id {
        return Ok(api_id.to_string());
    }
    apigateway
        .exists_api(name)
        .await?
        .api_id
        .ok_or_else(|| CliError::OperationFailed(format!("REST API '{}' not found", name)))
}

impl ApiCommand {
    #[instrument(name = "api", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let (mut runner, ctx) = connect(cli).await?;

        match self {
            ApiCommand::Create { name } => {
                let api_id = ApigatewayCli::new(&mut runner, &ctx).create(name).await?;
                info!("Created REST API '{}'", name);
                println!(
                    "{} {}",
                    ui::format_success("Created API"),
                    ui::format_highlight(&api_id)
                );
            }
            ApiCommand::Update { name, api_id } => {
                let mut apigateway = ApigatewayCli::new(&mut runner, &ctx);
                let api_id = lookup_api_id(&mut apigateway, name, api_id.as_deref()).await?;
                apigateway.update(name, &api_id).await?;
                println!(
                    "{} {}",
                    ui::format_success("Updated API"),
                    ui::format_highlight(&api_id)
                );
            }
            ApiCommand::Export { name, api_id } => {
                let mut apigateway = ApigatewayCli::new(&mut runner, &ctx);
                let api_id = lookup_api_id(&mut apigateway, name, api_id.as_deref()).await?;
                let path = apigateway.export_api(name, &api_id).await?;
                println!(
                    "{} {}",
                    ui::format_success("Exported to"),
                    ui::format_highlight(&path.display().to_string())
                );
            }
            ApiCommand::Exists { name } => {
                let presence = ApigatewayCli::new(&mut runner, &ctx).exists_api(name).await?;
                match presence.api_id {
                    Some(api_id) => {
                        println!("  API id:        {}", ui::format_highlight(&api_id));
                        println!(
                            "  Deployment id: {}",
                            presence.deployment_id.as_deref().unwrap_or("(none)")
                        );
                    }
                    None => println!("{}", ui::format_warning("API not found")),
                }
            }
            ApiCommand::Stage { api_id } => {
                let deployment_id = ApigatewayCli::new(&mut runner, &ctx)
                    .create_stage(api_id)
                    .await?;
                println!(
                    "{} {}",
                    ui::format_success("Created deployment"),
                    ui::format_highlight(&deployment_id)
                );
            }
            ApiCommand::Lambdas { api_id } => {
                let rows = ApigatewayCli::new(&mut runner, &ctx)
                    .get_lambda_infos(api_id)
                    .await?
                    .into_iter()
                    .map(|info| LambdaRow {
                        lambda_name: info.lambda_name,
                        resource_name: info.resource_name,
                        methods: info.methods.join(", "),
                    })
                    .collect();
                ui::print_table("Functions behind the API", rows);
            }
            ApiCommand::Deploy { name } => {
                let api_id = workflow::deploy_api(&mut runner, &ctx, &cli.runtime, name).await?;
                println!(
                    "{} {}",
                    ui::format_success("Deployed API"),
                    ui::format_highlight(&api_id)
                );
            }
        }
        Ok(())
    }
}

use super::common::connect;
use super::error::CliError;
use super::parser::Cli;
use super::ui;
use crate::aws::{list_roles, ApigatewayCli, FunctionSpec, LambdaCli};
use crate::workflow;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tabled::Tabled;
use tracing::{debug, instrument};

#[derive(Debug, Subcommand)]
pub enum LambdaCommand {
    /// Create a function from a ZIP archive
    Create(FunctionArgs),

    /// Upload new code and configuration for an existing function
    Update(FunctionArgs),

    /// Point the environment alias at a version, creating the alias if needed
    Alias {
        /// Function name
        function: String,
        /// Version to point the alias at
        #[arg(value_name = "VERSION")]
        function_version: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Publish the current code and configuration as a new version
    Publish {
        /// Function name
        function: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Publish a layer version from a ZIP archive
    Layer {
        /// Layer name
        name: String,
        /// ZIP archive with the layer content
        #[arg(long)]
        zip_file: PathBuf,
        #[arg(long)]
        description: Option<String>,
    },

    /// Check whether a function (or its environment alias) exists
    Exists {
        /// Function name
        function: String,
        /// Check the environment alias instead of the function
        #[arg(long)]
        alias: bool,
    },

    /// List layers compatible with the runtime
    Layers,

    /// Allow an API to invoke the environment alias of the functions behind it
    Permit {
        /// REST API id
        api_id: String,
    },

    /// Create or update a function, publish a version and move the environment alias to it
    Deploy {
        #[command(flatten)]
        function: FunctionArgs,
        /// Version description (defaults to the current timestamp)
        #[arg(long)]
        version_description: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct FunctionArgs {
    /// Function name; the handler is `<name>.lambda_handler`
    name: String,

    /// ZIP archive with the function code
    #[arg(long)]
    zip_file: PathBuf,

    /// Execution role name or ARN
    #[arg(long)]
    role: String,

    /// Timeout in seconds
    #[arg(long, default_value_t = 3)]
    timeout: u32,

    /// Memory size in MB
    #[arg(long, default_value_t = 128)]
    memory_size: u32,

    /// Layer name or version ARN (repeatable)
    #[arg(long = "layer")]
    layers: Vec<String>,

    #[arg(long)]
    description: Option<String>,
}

#[derive(Tabled)]
struct LayerRow<'a> {
    #[tabled(rename = "Layer")]
    name: &'a str,
    #[tabled(rename = "ARN")]
    layer_arn: &'a str,
    #[tabled(rename = "Latest version ARN")]
    layer_version_arn: &'a str,
}

fn is_arn(value: &str) -> bool {
    value.starts_with("arn:")
}

impl FunctionArgs {
    /// Resolve role and layer names to ARNs.
    async fn to_spec(&self, lambda: &mut LambdaCli<'_>) -> Result<FunctionSpec, CliError> {
        let role = if is_arn(&self.role) {
            self.role.clone()
        } else {
            let roles = list_roles(lambda.runner()).await?;
            roles
                .get(&self.role)
                .map(|r| r.arn.clone())
                .ok_or_else(|| {
                    CliError::ConfigError(format!("IAM role '{}' not found", self.role))
                })?
        };

        let mut layers = Vec::with_capacity(self.layers.len());
        if self.layers.iter().any(|l| !is_arn(l)) {
            let known = lambda.list_layers().await?;
            for layer in &self.layers {
                if is_arn(layer) {
                    layers.push(layer.clone());
                } else {
                    let info = known.get(layer).ok_or_else(|| {
                        CliError::ConfigError(format!(
                            "Layer '{}' not found for runtime {}",
                            layer,
                            lambda.runtime()
                        ))
                    })?;
                    layers.push(info.layer_version_arn.clone());
                }
            }
        } else {
            layers.extend(self.layers.iter().cloned());
        }
        debug!(role = %role, layers = ?layers, "Resolved function settings");

        Ok(FunctionSpec {
            name: self.name.clone(),
            zip_file: self.zip_file.clone(),
            role,
            timeout: self.timeout,
            memory_size: self.memory_size,
            layers,
            description: self.description.clone(),
        })
    }
}

impl LambdaCommand {
    #[instrument(name = "lambda", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let (mut runner, ctx) = connect(cli).await?;

        let mut lambda = LambdaCli::new(&mut runner, &ctx).with_runtime(cli.runtime.as_str());
        match self {
            LambdaCommand::Create(args) => {
                let spec = args.to_spec(&mut lambda).await?;
                lambda.create_function(&spec).await?;
                println!("{} {}", ui::format_success("Created"), ui::format_highlight(&spec.name));
            }
            LambdaCommand::Update(args) => {
                let spec = args.to_spec(&mut lambda).await?;
                lambda.update_function(&spec).await?;
                println!("{} {}", ui::format_success("Updated"), ui::format_highlight(&spec.name));
            }
            LambdaCommand::Alias {
                function,
                function_version,
                description,
            } => {
                if lambda.exists_alias(function).await? {
                    lambda
                        .update_alias(function, function_version, description.as_deref())
                        .await?;
                } else {
                    lambda
                        .create_alias(function, function_version, description.as_deref())
                        .await?;
                }
                println!(
                    "{} {} -> {}",
                    ui::format_success("Alias"),
                    ui::format_highlight(ctx.environment().unwrap_or_default()),
                    function_version
                );
            }
            LambdaCommand::Publish {
                function,
                description,
            } => {
                let version = lambda
                    .publish_function(function, description.as_deref())
                    .await?;
                println!(
                    "{} {} version {}",
                    ui::format_success("Published"),
                    function,
                    ui::format_highlight(&version)
                );
            }
            LambdaCommand::Layer {
                name,
                zip_file,
                description,
            } => {
                let arn = lambda
                    .publish_layer(name, zip_file, description.as_deref())
                    .await?;
                println!(
                    "{} {}",
                    ui::format_success("Published layer"),
                    ui::format_highlight(&arn)
                );
            }
            LambdaCommand::Exists { function, alias } => {
                let exists = if *alias {
                    lambda.exists_alias(function).await?
                } else {
                    lambda.exists_function(function).await?
                };
                println!("{}", exists);
            }
            LambdaCommand::Layers => {
                let layers = lambda.list_layers().await?;
                let rows = layers
                    .iter()
                    .map(|(name, info)| LayerRow {
                        name,
                        layer_arn: &info.layer_arn,
                        layer_version_arn: &info.layer_version_arn,
                    })
                    .collect();
                ui::print_table(&format!("Layers for {}", lambda.runtime()), rows);
            }
            LambdaCommand::Deploy {
                function,
                version_description,
            } => {
                let spec = function.to_spec(&mut lambda).await?;
                let version =
                    workflow::deploy_function(&mut lambda, &spec, version_description.as_deref())
                        .await?;
                println!(
                    "{} {} version {}",
                    ui::format_success("Deployed"),
                    spec.name,
                    ui::format_highlight(&version)
                );
            }
            LambdaCommand::Permit { api_id } => {
                let functions = ApigatewayCli::new(lambda.runner(), &ctx)
                    .get_lambda_infos(api_id)
                    .await?;
                lambda.add_permission(api_id, &functions).await?;
                println!(
                    "{} {} function(s) behind {}",
                    ui::format_success("Granted invoke permission to"),
                    functions.len(),
                    ui::format_highlight(api_id)
                );
            }
        }
        Ok(())
    }
}

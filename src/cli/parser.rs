use super::{api, docker, dynamodb, identity, lambda, s3};
use crate::aws::context::{DEFAULT_CONFIG_DIR, DEFAULT_REGION};
use crate::aws::lambda::DEFAULT_RUNTIME;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const VERSION_INFO: &str = env!("AWSDEPLOY_BUILD_VERSION");

#[derive(Parser, Debug)]
#[command(name = "awsdeploy")]
#[command(about = "Deploy API Gateway, Lambda, DynamoDB and S3 resources through the AWS CLI", long_about = None, version = VERSION_INFO)]
#[command(propagate_version = true)]
pub struct Cli {
    /// AWS profile (from ~/.aws/credentials) passed to every aws call
    #[arg(short = 'p', long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// AWS region used when building ARNs
    #[arg(short = 'r', long, default_value = DEFAULT_REGION, global = true)]
    pub region: String,

    /// Deployment environment (e.g. dev, prod); names API stages and Lambda aliases
    #[arg(short = 'e', long = "env", env = "AWSDEPLOY_ENV", global = true)]
    pub environment: Option<String>,

    /// Directory holding dynamodb/ table definitions and apigateway/ exports
    #[arg(long, default_value = DEFAULT_CONFIG_DIR, global = true)]
    pub config_dir: PathBuf,

    /// Lambda runtime for functions and layers
    #[arg(long, default_value = DEFAULT_RUNTIME, global = true)]
    pub runtime: String,

    /// Do not echo executed commands and their output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase message verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the account and ARN of the current credentials
    Whoami(identity::Whoami),

    /// List IAM roles
    Roles(identity::Roles),

    /// API Gateway REST APIs
    #[command(subcommand)]
    Api(api::ApiCommand),

    /// Lambda functions, aliases and layers
    #[command(subcommand)]
    Lambda(lambda::LambdaCommand),

    /// DynamoDB tables from JSON definitions
    #[command(subcommand)]
    Dynamodb(dynamodb::DynamodbCommand),

    /// Recursive S3 copies and listings
    #[command(subcommand)]
    S3(s3::S3Command),

    /// Local docker containers
    #[command(subcommand)]
    Docker(docker::DockerCommand),
}

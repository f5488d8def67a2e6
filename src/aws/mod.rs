//! Wrappers around the `aws` command line tool, one client per service.

pub mod apigateway;
pub mod context;
pub mod dynamodb;
pub mod error;
pub mod lambda;
pub mod s3;
pub mod types;

pub use apigateway::ApigatewayCli;
pub use context::{list_roles, AwsContext, AwsSettings};
pub use dynamodb::DynamodbCli;
pub use error::{AwsError, AwsResult};
pub use lambda::{FunctionSpec, LambdaCli};
pub use s3::{S3Cli, S3Filters};
pub use types::{ApiPresence, LambdaInfo, LayerInfo, RoleInfo};

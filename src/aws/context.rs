use super::error::{AwsError, AwsResult};
use super::types::{CallerIdentity, RoleInfo, RoleList};
use crate::executor::{CommandRunner, ErrorPolicy};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// User-supplied settings for an AWS session.
#[derive(Debug, Clone)]
pub struct AwsSettings {
    /// Profile from `~/.aws/credentials`; injected into the executor as `AWS_PROFILE`.
    pub profile: Option<String>,
    pub region: String,
    /// Deployment tag (`dev`, `prod`, ...) naming stages and aliases.
    pub environment: Option<String>,
    /// Root of `dynamodb/` table definitions and `apigateway/` exports.
    pub config_dir: PathBuf,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            profile: None,
            region: DEFAULT_REGION.to_string(),
            environment: None,
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
        }
    }
}

/// Account, caller and deployment settings shared by the service clients.
#[derive(Debug, Clone)]
pub struct AwsContext {
    pub profile: Option<String>,
    pub account: String,
    pub arn: String,
    pub region: String,
    environment: Option<String>,
    config_dir: PathBuf,
}

impl AwsContext {
    /// Resolve the caller identity with `aws sts get-caller-identity`.
    pub async fn resolve(runner: &mut CommandRunner, settings: AwsSettings) -> AwsResult<Self> {
        let cmd = "aws sts get-caller-identity --output yaml";
        let identity: CallerIdentity = runner.run(cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        tracing::info!(
            account = %identity.account,
            region = %settings.region,
            environment = settings.environment.as_deref().unwrap_or("-"),
            "Resolved AWS caller {}",
            identity.arn
        );

        Ok(Self::from_parts(settings, identity.account, identity.arn))
    }

    /// Build a context without calling STS.
    pub fn from_parts(
        settings: AwsSettings,
        account: impl Into<String>,
        arn: impl Into<String>,
    ) -> Self {
        Self {
            profile: settings.profile,
            account: account.into(),
            arn: arn.into(),
            region: settings.region,
            environment: settings.environment.filter(|e| !e.is_empty()),
            config_dir: settings.config_dir,
        }
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// The environment tag, required by stage and alias operations.
    pub fn require_environment(&self, operation: &str) -> AwsResult<&str> {
        self.environment
            .as_deref()
            .ok_or_else(|| AwsError::EnvironmentNotSet(operation.to_string()))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// IAM roles keyed by role name.
pub async fn list_roles(runner: &mut CommandRunner) -> AwsResult<BTreeMap<String, RoleInfo>> {
    let cmd = "aws iam list-roles --output yaml";
    let list: RoleList = runner.run(cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
    Ok(list
        .roles
        .into_iter()
        .map(|role| {
            (
                role.role_name,
                RoleInfo {
                    arn: role.arn,
                    role_id: role.role_id,
                },
            )
        })
        .collect())
}

//! AWS Lambda operations: functions, versions, aliases, layers and the
//! invoke permissions API Gateway needs.

use super::context::AwsContext;
use super::error::AwsResult;
use super::types::{
    FunctionPolicy, LambdaInfo, LayerInfo, LayerList, LayerVersion, PublishedVersion,
};
use crate::executor::{CommandRunner, ErrorPolicy};
use crate::util::{random_string, shell_escape, single_quote};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_RUNTIME: &str = "python3.8";
pub const STATEMENT_ID_LEN: usize = 36;

/// Everything `create-function` / `update-function-configuration` needs.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub name: String,
    pub zip_file: PathBuf,
    /// Execution role ARN.
    pub role: String,
    /// Seconds.
    pub timeout: u32,
    /// MB.
    pub memory_size: u32,
    /// Layer version ARNs.
    pub layers: Vec<String>,
    pub description: Option<String>,
}

/// `'fileb://<path>'`, quoted for the shell.
fn zip_argument(zip_file: &Path) -> String {
    single_quote(&format!("fileb://{}", zip_file.display()))
}

pub struct LambdaCli<'a> {
    runner: &'a mut CommandRunner,
    ctx: &'a AwsContext,
    runtime: String,
}

impl<'a> LambdaCli<'a> {
    pub fn new(runner: &'a mut CommandRunner, ctx: &'a AwsContext) -> Self {
        Self {
            runner,
            ctx,
            runtime: DEFAULT_RUNTIME.to_string(),
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn context(&self) -> &AwsContext {
        self.ctx
    }

    /// The runner this client executes through, for calls outside Lambda.
    pub fn runner(&mut self) -> &mut CommandRunner {
        &mut *self.runner
    }

    pub async fn create_function(&mut self, spec: &FunctionSpec) -> AwsResult<()> {
        let mut cmd_parts = vec![
            "aws lambda create-function".to_string(),
            format!("--function-name {}", spec.name),
        ];
        cmd_parts.extend(self.configuration_flags(spec));
        cmd_parts.push(format!("--zip-file {}", zip_argument(&spec.zip_file)));
        cmd_parts.push("--output yaml".to_string());
        cmd_parts.extend(self.optional_flags(spec));

        tracing::info!("Creating Lambda function '{}'", spec.name);
        self.runner
            .run(&cmd_parts.join(" "), ErrorPolicy::Stop)
            .await?;
        Ok(())
    }

    /// Upload new code, then replace the configuration.
    pub async fn update_function(&mut self, spec: &FunctionSpec) -> AwsResult<()> {
        tracing::info!("Updating Lambda function '{}'", spec.name);
        let cmd = format!(
            "aws lambda update-function-code --function-name {} --zip-file {} --output yaml",
            spec.name,
            zip_argument(&spec.zip_file)
        );
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;

        let mut cmd_parts = vec![
            "aws lambda update-function-configuration".to_string(),
            format!("--function-name {}", spec.name),
            "--output yaml".to_string(),
        ];
        cmd_parts.extend(self.configuration_flags(spec));
        cmd_parts.extend(self.optional_flags(spec));
        self.runner
            .run(&cmd_parts.join(" "), ErrorPolicy::Stop)
            .await?;
        Ok(())
    }

    /// Point a new alias named after the environment at `version`.
    pub async fn create_alias(
        &mut self,
        function_name: &str,
        version: &str,
        description: Option<&str>,
    ) -> AwsResult<()> {
        let cmd = self.alias_command("create-alias", function_name, version, description)?;
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }

    /// Move the environment alias to `version`.
    pub async fn update_alias(
        &mut self,
        function_name: &str,
        version: &str,
        description: Option<&str>,
    ) -> AwsResult<()> {
        let cmd = self.alias_command("update-alias", function_name, version, description)?;
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }

    /// Allow API Gateway to invoke the environment alias of every function
    /// behind `api_id`, skipping `OPTIONS` and grants that already exist.
    pub async fn add_permission(
        &mut self,
        api_id: &str,
        functions: &[LambdaInfo],
    ) -> AwsResult<()> {
        let ctx = self.ctx;
        let env = ctx.require_environment("lambda add-permission")?;

        for func in functions {
            let function_arn = format!(
                "arn:aws:lambda:{}:{}:function:{}:{}",
                ctx.region, ctx.account, func.lambda_name, env
            );
            for method in func.methods.iter().filter(|m| m.as_str() != "OPTIONS") {
                let source_arn = format!(
                    "arn:aws:execute-api:{}:{}:{}/*/{}/{}",
                    ctx.region, ctx.account, api_id, method, func.resource_name
                );
                if self.exists_permission(&func.lambda_name, &source_arn).await? {
                    tracing::debug!("Permission for {} already granted", source_arn);
                    continue;
                }

                // Statement ids must be unique within the function policy. The
                // `=` form keeps an id starting with `-` from reading as a flag.
                let statement_id = random_string(STATEMENT_ID_LEN);
                let cmd = format!(
                    "aws lambda add-permission --function-name '{}' --source-arn '{}' --principal apigateway.amazonaws.com --statement-id={} --action lambda:InvokeFunction --output yaml",
                    function_arn, source_arn, statement_id
                );
                tracing::info!("Granting {} on {}", source_arn, function_arn);
                self.runner.run(&cmd, ErrorPolicy::Stop).await?;
            }
        }
        Ok(())
    }

    /// Publish the current code and configuration as a new version.
    pub async fn publish_function(
        &mut self,
        function_name: &str,
        description: Option<&str>,
    ) -> AwsResult<String> {
        let mut cmd = format!(
            "aws lambda publish-version --function-name {} --output yaml",
            function_name
        );
        if let Some(description) = description {
            cmd.push_str(&format!(" --description {}", shell_escape(description)));
        }
        let published: PublishedVersion =
            self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        tracing::info!("Published {} version {}", function_name, published.version);
        Ok(published.version)
    }

    /// Publish a layer version from a ZIP archive. Returns its version ARN.
    pub async fn publish_layer(
        &mut self,
        layer_name: &str,
        zip_file: &Path,
        description: Option<&str>,
    ) -> AwsResult<String> {
        let mut cmd = format!(
            "aws lambda publish-layer-version --layer-name {} --license-info 'MIT' --compatible-runtimes {} --zip-file {} --output yaml",
            layer_name,
            self.runtime,
            zip_argument(zip_file)
        );
        if let Some(description) = description {
            cmd.push_str(&format!(" --description {}", shell_escape(description)));
        }
        let layer: LayerVersion = self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        Ok(layer.layer_version_arn)
    }

    pub async fn exists_function(&mut self, function_name: &str) -> AwsResult<bool> {
        let cmd = format!(
            "aws lambda get-function --function-name {} --output yaml",
            function_name
        );
        let result = self.runner.run(&cmd, ErrorPolicy::Continue).await?;
        Ok(result.is_success())
    }

    pub async fn exists_alias(&mut self, function_name: &str) -> AwsResult<bool> {
        let ctx = self.ctx;
        let env = ctx.require_environment("lambda get-alias")?;
        let cmd = format!(
            "aws lambda get-alias --function-name {} --name {} --output yaml",
            function_name, env
        );
        let result = self.runner.run(&cmd, ErrorPolicy::Continue).await?;
        Ok(result.is_success())
    }

    /// Layers compatible with the configured runtime, keyed by layer name.
    pub async fn list_layers(&mut self) -> AwsResult<BTreeMap<String, LayerInfo>> {
        let cmd = format!(
            "aws lambda list-layers --compatible-runtime {} --output yaml",
            self.runtime
        );
        let list: LayerList = self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        Ok(list
            .layers
            .into_iter()
            .map(|layer| {
                (
                    layer.layer_name,
                    LayerInfo {
                        layer_arn: layer.layer_arn,
                        layer_version_arn: layer.latest_matching_version.layer_version_arn,
                    },
                )
            })
            .collect())
    }

    async fn exists_permission(
        &mut self,
        function_name: &str,
        source_arn: &str,
    ) -> AwsResult<bool> {
        let ctx = self.ctx;
        let env = ctx.require_environment("lambda get-policy")?;
        let cmd = format!(
            "aws lambda get-policy --function-name '{}:{}' --output yaml",
            function_name, env
        );
        let result = self.runner.run(&cmd, ErrorPolicy::Continue).await?;
        if !result.is_success() {
            return Ok(false);
        }
        // The policy document comes back as a JSON string.
        let policy: FunctionPolicy = result.parse_yaml()?;
        Ok(policy.policy.contains(source_arn))
    }

    fn configuration_flags(&self, spec: &FunctionSpec) -> Vec<String> {
        vec![
            format!("--runtime {}", self.runtime),
            format!("--role {}", spec.role),
            format!("--handler {}.lambda_handler", spec.name),
            format!("--timeout {}", spec.timeout),
            format!("--memory-size {}", spec.memory_size),
        ]
    }

    fn optional_flags(&self, spec: &FunctionSpec) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(description) = spec.description.as_deref().filter(|d| !d.is_empty()) {
            flags.push(format!("--description {}", shell_escape(description)));
        }
        if let Some(env) = self.ctx.environment() {
            flags.push(format!(
                "--environment Variables={{AWS_LAMBDA_FUNCTION_ALIAS={}}}",
                env
            ));
        }
        if !spec.layers.is_empty() {
            flags.push(format!("--layers {}", spec.layers.join(" ")));
        }
        flags
    }

    fn alias_command(
        &self,
        verb: &str,
        function_name: &str,
        version: &str,
        description: Option<&str>,
    ) -> AwsResult<String> {
        let env = self.ctx.require_environment(&format!("lambda {}", verb))?;
        let mut cmd = format!(
            "aws lambda {} --function-name {} --name {} --function-version {} --output yaml",
            verb,
            function_name,
            env,
            shell_escape(version)
        );
        if let Some(description) = description {
            cmd.push_str(&format!(" --description {}", shell_escape(description)));
        }
        Ok(cmd)
    }
}

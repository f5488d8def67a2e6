//! API Gateway (REST) operations.

use super::context::AwsContext;
use super::error::{AwsError, AwsResult};
use super::types::{ApiPresence, Identified, LambdaInfo, ResourceList, RestApiList, StageList};
use crate::executor::{CommandRunner, ErrorPolicy};
use crate::util::{single_quote, UtilError};
use std::path::PathBuf;

/// Path part of the placeholder resource created with a new API.
pub const MOCK_RESOURCE: &str = "mock";

pub struct ApigatewayCli<'a> {
    runner: &'a mut CommandRunner,
    ctx: &'a AwsContext,
}

impl<'a> ApigatewayCli<'a> {
    pub fn new(runner: &'a mut CommandRunner, ctx: &'a AwsContext) -> Self {
        Self { runner, ctx }
    }

    /// Create a regional REST API with a mocked `GET /mock`, deploy it to the
    /// environment stage and export its definition. Returns the API id.
    pub async fn create(&mut self, api_name: &str) -> AwsResult<String> {
        let ctx = self.ctx;
        let env = ctx.require_environment("apigateway create")?;
        tracing::info!("Creating REST API '{}' for stage '{}'", api_name, env);

        let (api_id, root_id) = self.create_rest_api(api_name).await?;
        let resource_id = self
            .create_resource(&api_id, &root_id, MOCK_RESOURCE)
            .await?;
        self.put_method(&api_id, &resource_id, "GET", "NONE")
            .await?;
        self.put_integration(&api_id, &resource_id, "GET", "MOCK")
            .await?;
        self.create_stage(&api_id).await?;
        self.export_api(api_name, &api_id).await?;
        Ok(api_id)
    }

    /// Overwrite an API from its exported definition, redeploy the stage and
    /// export the result again.
    pub async fn update(&mut self, api_name: &str, api_id: &str) -> AwsResult<()> {
        tracing::info!("Updating REST API '{}' ({})", api_name, api_id);
        self.import_api(api_name, api_id).await?;
        self.create_stage(api_id).await?;
        self.export_api(api_name, api_id).await?;
        Ok(())
    }

    /// Location of the OpenAPI export for `api_name` in the current environment.
    pub fn export_path(&self, api_name: &str) -> AwsResult<PathBuf> {
        let env = self.ctx.require_environment("apigateway export")?;
        Ok(self
            .ctx
            .config_dir()
            .join("apigateway")
            .join(format!("{}-{}-oas30-apigateway.yaml", api_name, env)))
    }

    /// Export the stage as OAS 3.0 YAML with API Gateway extensions.
    pub async fn export_api(&mut self, api_name: &str, api_id: &str) -> AwsResult<PathBuf> {
        let ctx = self.ctx;
        let env = ctx.require_environment("apigateway get-export")?;
        let path = self.export_path(api_name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| UtilError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let cmd = format!(
            "aws apigateway get-export --parameters extensions='apigateway' --rest-api-id {} --stage-name {} --export-type oas30 --accepts application/yaml {}",
            api_id,
            env,
            single_quote(&path.display().to_string())
        );
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(path)
    }

    /// Look an API up by name and, when an environment is set, find the
    /// deployment behind the stage of that name.
    pub async fn exists_api(&mut self, api_name: &str) -> AwsResult<ApiPresence> {
        let cmd = "aws apigateway get-rest-apis --output yaml";
        let apis: RestApiList = self.runner.run(cmd, ErrorPolicy::Stop).await?.parse_yaml()?;

        let api_id = apis
            .items
            .into_iter()
            .find(|api| api.name == api_name)
            .map(|api| api.id);

        let ctx = self.ctx;
        let deployment_id = match (api_id.as_deref(), ctx.environment()) {
            (Some(api_id), Some(env)) => self.find_stage_deployment(api_id, env).await?,
            _ => None,
        };

        Ok(ApiPresence {
            api_id,
            deployment_id,
        })
    }

    async fn find_stage_deployment(
        &mut self,
        api_id: &str,
        stage_name: &str,
    ) -> AwsResult<Option<String>> {
        let cmd = format!(
            "aws apigateway get-stages --rest-api-id {} --output yaml",
            api_id
        );
        let stages: StageList = self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        Ok(stages
            .item
            .into_iter()
            .find(|stage| stage.stage_name == stage_name)
            .map(|stage| stage.deployment_id))
    }

    /// Deploy the API to the environment stage. Returns the deployment id.
    pub async fn create_stage(&mut self, api_id: &str) -> AwsResult<String> {
        let ctx = self.ctx;
        let env = ctx.require_environment("apigateway create-deployment")?;
        let cmd = format!(
            "aws apigateway create-deployment --rest-api-id {} --stage-name {} --variables alias={} --output yaml",
            api_id, env, env
        );
        let deployment: Identified = self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        tracing::info!("Deployed {} to stage '{}' as {}", api_id, env, deployment.id);
        Ok(deployment.id)
    }

    /// Resources with a path part, one per backing Lambda function.
    pub async fn get_lambda_infos(&mut self, api_id: &str) -> AwsResult<Vec<LambdaInfo>> {
        let resources = self.get_resources(api_id).await?;
        Ok(resources
            .items
            .into_iter()
            .filter_map(|resource| {
                let path_part = resource.path_part?;
                Some(LambdaInfo {
                    lambda_name: path_part.replace('-', "_"),
                    resource_name: path_part,
                    methods: resource.resource_methods.into_keys().collect(),
                })
            })
            .collect())
    }

    async fn get_resources(&mut self, api_id: &str) -> AwsResult<ResourceList> {
        let cmd = format!(
            "aws apigateway get-resources --rest-api-id {} --output yaml",
            api_id
        );
        Ok(self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?)
    }

    /// Returns the new API id and the id of its root resource.
    async fn create_rest_api(&mut self, api_name: &str) -> AwsResult<(String, String)> {
        let cmd = format!(
            "aws apigateway create-rest-api --name {} --region {} --endpoint-configuration types=REGIONAL --output yaml",
            api_name, self.ctx.region
        );
        let api: Identified = self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;

        let root_id = self
            .get_resources(&api.id)
            .await?
            .items
            .into_iter()
            .next()
            .map(|resource| resource.id)
            .ok_or_else(|| {
                AwsError::missing_field(
                    format!("aws apigateway get-resources --rest-api-id {}", api.id),
                    "root resource",
                )
            })?;

        Ok((api.id, root_id))
    }

    async fn create_resource(
        &mut self,
        api_id: &str,
        parent_id: &str,
        path_part: &str,
    ) -> AwsResult<String> {
        let cmd = format!(
            "aws apigateway create-resource --rest-api-id {} --parent-id {} --path-part {} --output yaml",
            api_id, parent_id, path_part
        );
        let resource: Identified = self.runner.run(&cmd, ErrorPolicy::Stop).await?.parse_yaml()?;
        Ok(resource.id)
    }

    async fn put_method(
        &mut self,
        api_id: &str,
        resource_id: &str,
        http_method: &str,
        authorization_type: &str,
    ) -> AwsResult<()> {
        let cmd = format!(
            "aws apigateway put-method --rest-api-id {} --resource-id {} --http-method {} --authorization-type {}",
            api_id, resource_id, http_method, authorization_type
        );
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }

    async fn put_integration(
        &mut self,
        api_id: &str,
        resource_id: &str,
        http_method: &str,
        integration_type: &str,
    ) -> AwsResult<()> {
        let cmd = format!(
            "aws apigateway put-integration --rest-api-id {} --resource-id {} --http-method {} --type {}",
            api_id, resource_id, http_method, integration_type
        );
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }

    async fn import_api(&mut self, api_name: &str, api_id: &str) -> AwsResult<()> {
        let path = self.export_path(api_name)?;
        let cmd = format!(
            "aws apigateway put-rest-api --rest-api-id {} --mode overwrite --cli-binary-format raw-in-base64-out --body {} --output yaml",
            api_id,
            single_quote(&format!("file://{}", path.display()))
        );
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }
}

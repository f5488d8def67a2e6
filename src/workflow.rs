//! Create-or-update sequences built from the service clients.

use crate::aws::{ApigatewayCli, AwsContext, FunctionSpec, LambdaCli};
use crate::executor::CommandRunner;
use crate::util::timestamp;
use anyhow::{ensure, Context, Result};

/// Ship a function to the environment alias: update or create it, publish a
/// version, then update or create the alias. Returns the published version.
///
/// The version description defaults to the current timestamp.
pub async fn deploy_function(
    lambda: &mut LambdaCli<'_>,
    spec: &FunctionSpec,
    version_description: Option<&str>,
) -> Result<String> {
    let env = lambda
        .context()
        .require_environment("deploy function")?
        .to_string();

    if lambda.exists_function(&spec.name).await? {
        lambda
            .update_function(spec)
            .await
            .with_context(|| format!("Failed to update function '{}'", spec.name))?;
    } else {
        lambda
            .create_function(spec)
            .await
            .with_context(|| format!("Failed to create function '{}'", spec.name))?;
    }

    let description = version_description
        .map(str::to_string)
        .unwrap_or_else(timestamp);
    let version = lambda
        .publish_function(&spec.name, Some(&description))
        .await
        .with_context(|| format!("Failed to publish function '{}'", spec.name))?;

    let aliased = if lambda.exists_alias(&spec.name).await? {
        lambda.update_alias(&spec.name, &version, None).await
    } else {
        lambda.create_alias(&spec.name, &version, None).await
    };
    aliased.with_context(|| format!("Failed to point alias '{}' at version {}", env, version))?;

    tracing::info!("Function '{}' version {} is live on '{}'", spec.name, version, env);
    Ok(version)
}

/// Create the API, or re-import it from its export when it already exists,
/// then grant it permission to invoke the functions behind its resources.
/// Returns the API id.
pub async fn deploy_api(
    runner: &mut CommandRunner,
    ctx: &AwsContext,
    runtime: &str,
    api_name: &str,
) -> Result<String> {
    ctx.require_environment("deploy api")?;

    let (api_id, functions) = {
        let mut apigateway = ApigatewayCli::new(runner, ctx);
        let presence = apigateway.exists_api(api_name).await?;

        let api_id = match presence.api_id {
            Some(api_id) => {
                let export = apigateway.export_path(api_name)?;
                ensure!(
                    export.exists(),
                    "API '{}' exists but its definition {} is missing; run `api export` first",
                    api_name,
                    export.display()
                );
                apigateway
                    .update(api_name, &api_id)
                    .await
                    .with_context(|| format!("Failed to update API '{}'", api_name))?;
                api_id
            }
            None => apigateway
                .create(api_name)
                .await
                .with_context(|| format!("Failed to create API '{}'", api_name))?,
        };

        let functions = apigateway.get_lambda_infos(&api_id).await?;
        (api_id, functions)
    };

    tracing::info!(
        "Granting API {} access to {} function(s)",
        api_id,
        functions.len()
    );
    LambdaCli::new(runner, ctx)
        .with_runtime(runtime)
        .add_permission(&api_id, &functions)
        .await
        .context("Failed to add invoke permissions")?;

    Ok(api_id)
}

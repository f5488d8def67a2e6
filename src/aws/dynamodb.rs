use super::context::AwsContext;
use super::error::AwsResult;
use crate::executor::{CommandRunner, ErrorPolicy};
use crate::util::{load_json_string, single_quote};
use std::path::PathBuf;

pub struct DynamodbCli<'a> {
    runner: &'a mut CommandRunner,
    ctx: &'a AwsContext,
}

impl<'a> DynamodbCli<'a> {
    pub fn new(runner: &'a mut CommandRunner, ctx: &'a AwsContext) -> Self {
        Self { runner, ctx }
    }

    /// `<config_dir>/dynamodb/<table>.json`
    pub fn definition_path(&self, table_name: &str) -> PathBuf {
        self.ctx
            .config_dir()
            .join("dynamodb")
            .join(format!("{}.json", table_name))
    }

    /// Create a table from its JSON definition file.
    pub async fn create_table(&mut self, table_name: &str) -> AwsResult<()> {
        let json = load_json_string(self.definition_path(table_name))?;
        let cmd = format!(
            "aws dynamodb create-table --output text --cli-input-json {}",
            single_quote(&json)
        );
        tracing::info!("Creating DynamoDB table '{}'", table_name);
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }

    pub async fn delete_table(&mut self, table_name: &str) -> AwsResult<()> {
        let cmd = format!("aws dynamodb delete-table --table-name {}", table_name);
        tracing::info!("Deleting DynamoDB table '{}'", table_name);
        self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(())
    }
}

#![cfg(unix)]

mod common;

use awsdeploy::aws::{list_roles, AwsContext, AwsError, AwsSettings, DynamodbCli, LambdaCli};
use awsdeploy::docker::{DockerCli, DYNAMODB_LOCAL_IMAGE};
use awsdeploy::executor::{CommandRunner, ErrorPolicy, ExecutorError};
use common::FakeBin;
use tempfile::TempDir;
use tokio::fs;

#[tokio::test]
async fn test_resolve_context_through_fake_aws() {
    let bin = FakeBin::new().await;
    let mut runner = CommandRunner::new(bin.executor().with_env("AWS_PROFILE", "staging")).quiet();

    let settings = AwsSettings {
        profile: Some("staging".to_string()),
        environment: Some("dev".to_string()),
        ..AwsSettings::default()
    };
    let ctx = AwsContext::resolve(&mut runner, settings)
        .await
        .expect("Failed to resolve context");

    assert_eq!(ctx.account, "123456789012");
    assert_eq!(ctx.arn, "arn:aws:iam::123456789012:user/deployer");
    assert_eq!(ctx.environment(), Some("dev"));
    assert_eq!(bin.read("profile").await, "staging");
}

#[tokio::test]
async fn test_list_roles_keys_by_name() {
    let bin = FakeBin::new().await;
    let mut runner = bin.runner();

    let roles = list_roles(&mut runner).await.expect("Failed to list roles");

    assert_eq!(roles.len(), 2);
    assert_eq!(
        roles["lambda-exec"].arn,
        "arn:aws:iam::123456789012:role/lambda-exec"
    );
    assert_eq!(roles["api-logs"].role_id, "AROAEXAMPLE2");
}

#[tokio::test]
async fn test_exists_function_uses_exit_status() {
    let bin = FakeBin::new().await;
    let mut runner = bin.runner();
    let ctx = AwsContext::from_parts(AwsSettings::default(), "123456789012", "arn");
    let mut lambda = LambdaCli::new(&mut runner, &ctx);

    assert!(lambda.exists_function("orders").await.unwrap());
    assert!(!lambda.exists_function("missing").await.unwrap());
}

#[tokio::test]
async fn test_stop_policy_reports_exit_code_and_stderr() {
    let bin = FakeBin::new().await;
    let mut runner = bin.runner();

    let err = runner
        .run("aws s3api list-buckets", ErrorPolicy::Stop)
        .await
        .unwrap_err();
    match err {
        ExecutorError::CommandFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, 2);
            assert!(stderr.contains("unexpected call: s3api list-buckets"));
        }
        other => panic!("Unexpected error: {:?}", other),
    }

    let result = runner
        .run("aws s3api list-buckets", ErrorPolicy::Continue)
        .await
        .expect("Continue policy should hand back the result");
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_create_table_passes_definition_as_one_argument() {
    let bin = FakeBin::new().await;
    let root = TempDir::new().unwrap();
    let config = common::config_dir(root.path());
    fs::create_dir_all(config.join("dynamodb")).await.unwrap();
    fs::write(
        config.join("dynamodb").join("users.json"),
        r#"{"TableName": "users", "BillingMode": "PAY_PER_REQUEST", "Description": "it's the users table"}"#,
    )
    .await
    .unwrap();

    let mut runner = bin.runner();
    let settings = AwsSettings {
        config_dir: config,
        ..AwsSettings::default()
    };
    let ctx = AwsContext::from_parts(settings, "123456789012", "arn");
    DynamodbCli::new(&mut runner, &ctx)
        .create_table("users")
        .await
        .expect("Failed to create table");

    let received: serde_json::Value = serde_json::from_str(&bin.read("table.json").await).unwrap();
    assert_eq!(received["TableName"], "users");
    assert_eq!(received["Description"], "it's the users table");
}

#[tokio::test]
async fn test_create_table_without_definition_fails_before_running() {
    let bin = FakeBin::new().await;
    let root = TempDir::new().unwrap();
    let mut runner = bin.runner();
    let settings = AwsSettings {
        config_dir: common::config_dir(root.path()),
        ..AwsSettings::default()
    };
    let ctx = AwsContext::from_parts(settings, "123456789012", "arn");

    let err = DynamodbCli::new(&mut runner, &ctx)
        .create_table("ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, AwsError::File(_)));
    assert_eq!(bin.read("table.json").await, "");
}

#[tokio::test]
async fn test_docker_running_matches_image_column() {
    let bin = FakeBin::new().await;
    let mut runner = bin.runner();
    let mut docker = DockerCli::new(&mut runner);

    assert!(docker.is_running(DYNAMODB_LOCAL_IMAGE).await.unwrap());
    assert!(!docker.is_running("postgres").await.unwrap());
}

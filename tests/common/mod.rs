use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use awsdeploy::executor::{CommandRunner, LocalCommandExecutor};

/// Stand-in for the `aws` binary. Records `AWS_PROFILE` and the JSON handed to
/// `create-table` next to itself so tests can inspect what the child received.
pub const FAKE_AWS: &str = r#"#!/bin/sh
here=$(dirname "$0")
printf '%s' "$AWS_PROFILE" > "$here/profile"
case "$1 $2" in
  "sts get-caller-identity")
    printf "Account: '123456789012'\nArn: arn:aws:iam::123456789012:user/deployer\nUserId: AIDAEXAMPLE\n"
    ;;
  "iam list-roles")
    cat <<'YAML'
Roles:
- RoleName: lambda-exec
  RoleId: AROAEXAMPLE1
  Arn: arn:aws:iam::123456789012:role/lambda-exec
- RoleName: api-logs
  RoleId: AROAEXAMPLE2
  Arn: arn:aws:iam::123456789012:role/api-logs
YAML
    ;;
  "lambda get-function")
    if [ "$4" = "orders" ]; then
      echo "Configuration:"
      echo "  FunctionName: orders"
    else
      echo "An error occurred (ResourceNotFoundException): Function not found: $4" >&2
      exit 254
    fi
    ;;
  "dynamodb create-table")
    printf '%s' "$6" > "$here/table.json"
    echo "TABLEDESCRIPTION"
    ;;
  *)
    echo "unexpected call: $*" >&2
    exit 2
    ;;
esac
"#;

pub const FAKE_DOCKER: &str = r#"#!/bin/sh
if [ "$1" = "ps" ]; then
  echo "CONTAINER ID   IMAGE                   COMMAND                  CREATED       STATUS       PORTS                    NAMES"
  echo "3f2a1b9c8d7e   amazon/dynamodb-local   \"java -jar DynamoDBL…\"   2 hours ago   Up 2 hours   0.0.0.0:8000->8000/tcp   dynamodb"
  exit 0
fi
exit 1
"#;

/// A temporary directory of executable scripts placed first on `PATH`.
pub struct FakeBin {
    dir: TempDir,
}

impl FakeBin {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let bin = Self { dir };
        bin.install("aws", FAKE_AWS).await;
        bin.install("docker", FAKE_DOCKER).await;
        bin
    }

    async fn install(&self, name: &str, script: &str) {
        let path = self.dir.path().join(name);
        fs::write(&path, script)
            .await
            .expect("Failed to write fake binary");
        fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .await
            .expect("Failed to make fake binary executable");
    }

    /// A file the fake `aws` wrote during the test.
    pub async fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name))
            .await
            .unwrap_or_default()
    }

    pub fn executor(&self) -> LocalCommandExecutor {
        let system_path = std::env::var("PATH").unwrap_or_default();
        LocalCommandExecutor::new().with_env(
            "PATH",
            format!("{}:{}", self.dir.path().display(), system_path),
        )
    }

    pub fn runner(&self) -> CommandRunner {
        CommandRunner::new(self.executor()).quiet()
    }
}

pub fn config_dir(root: &Path) -> PathBuf {
    root.join("config")
}

mod error;

use crate::executor::{CommandRunner, ErrorPolicy};
pub use error::{DockerError, DockerResult};

/// Image of the local DynamoDB container.
pub const DYNAMODB_LOCAL_IMAGE: &str = "amazon/dynamodb-local";

pub struct DockerCli<'a> {
    runner: &'a mut CommandRunner,
}

impl<'a> DockerCli<'a> {
    pub fn new(runner: &'a mut CommandRunner) -> Self {
        Self { runner }
    }

    /// Whether a running container uses `image`, judged from the IMAGE column of `docker ps`.
    pub async fn is_running(&mut self, image: &str) -> DockerResult<bool> {
        let result = self.runner.run("docker ps", ErrorPolicy::Stop).await?;
        let running = result
            .output
            .stdout_lines()?
            .iter()
            .skip(1) // header
            .any(|line| line.split_whitespace().nth(1) == Some(image));

        tracing::debug!("Container for {} running: {}", image, running);
        Ok(running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::MockExecutor;

    const PS_HEADER: &str = "CONTAINER ID   IMAGE                   COMMAND                  CREATED        STATUS        PORTS                    NAMES\n";

    fn runner(stdout: &str) -> CommandRunner {
        let mut mock = MockExecutor::new();
        mock.add_success("docker ps", stdout);
        CommandRunner::new(mock).quiet()
    }

    #[tokio::test]
    async fn test_detects_running_image() {
        let stdout = format!(
            "{}3f4e8a1b2c3d   nginx:latest            \"/docker-entrypoint.…\"   2 hours ago    Up 2 hours    80/tcp                   web\n9a8b7c6d5e4f   amazon/dynamodb-local   \"java -jar DynamoDBL…\"   3 hours ago    Up 3 hours    0.0.0.0:8000->8000/tcp   dynamodb\n",
            PS_HEADER
        );
        let mut runner = runner(&stdout);

        let mut docker = DockerCli::new(&mut runner);
        assert!(docker.is_running(DYNAMODB_LOCAL_IMAGE).await.unwrap());
    }

    #[tokio::test]
    async fn test_header_only_means_not_running() {
        let mut runner = runner(PS_HEADER);
        assert!(!DockerCli::new(&mut runner)
            .is_running(DYNAMODB_LOCAL_IMAGE)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_other_images_do_not_match() {
        let stdout = format!(
            "{}3f4e8a1b2c3d   amazon/dynamodb-local-x   \"java\"   2 hours ago   Up 2 hours   dyn\n",
            PS_HEADER
        );
        let mut runner = runner(&stdout);
        assert!(!DockerCli::new(&mut runner)
            .is_running(DYNAMODB_LOCAL_IMAGE)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_docker_failure_is_an_error() {
        let mut mock = MockExecutor::new();
        mock.add_failure(
            "docker ps",
            1,
            "Cannot connect to the Docker daemon at unix:///var/run/docker.sock",
        );
        let mut runner = CommandRunner::new(mock).quiet();

        let err = DockerCli::new(&mut runner)
            .is_running(DYNAMODB_LOCAL_IMAGE)
            .await
            .unwrap_err();
        assert!(matches!(err, DockerError::Executor(_)));
    }
}

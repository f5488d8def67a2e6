use super::error::AwsResult;
use crate::executor::{CommandRunner, ErrorPolicy};
use crate::util::{shell_escape, single_quote};
use std::path::Path;

/// UNIX-style wildcard filters passed to `aws s3` as `--exclude` / `--include`.
/// Order matters to the CLI: later filters win, so exclude comes first.
#[derive(Debug, Clone, Default)]
pub struct S3Filters {
    pub exclude: Option<String>,
    pub include: Option<String>,
}

impl S3Filters {
    fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(exclude) = self.exclude.as_deref().filter(|e| !e.is_empty()) {
            flags.push(format!("--exclude {}", shell_escape(exclude)));
        }
        if let Some(include) = self.include.as_deref().filter(|i| !i.is_empty()) {
            flags.push(format!("--include {}", shell_escape(include)));
        }
        flags
    }
}

pub fn s3_uri(bucket: &str, prefix: &str) -> String {
    format!("s3://{}/{}", bucket, prefix)
}

pub struct S3Cli<'a> {
    runner: &'a mut CommandRunner,
}

impl<'a> S3Cli<'a> {
    pub fn new(runner: &'a mut CommandRunner) -> Self {
        Self { runner }
    }

    /// e.g. `upload("./data", "my-bucket", "reports/2024", &S3Filters { exclude: Some("*".into()), include: Some("*.txt".into()) })`
    /// uploads only the `.txt` files under `./data`.
    pub async fn upload(
        &mut self,
        local_dir: &Path,
        bucket: &str,
        prefix: &str,
        filters: &S3Filters,
    ) -> AwsResult<()> {
        let source = single_quote(&local_dir.display().to_string());
        self.transfer("cp", &source, Some(&s3_uri(bucket, prefix)), filters)
            .await
    }

    pub async fn download(
        &mut self,
        local_dir: &Path,
        bucket: &str,
        prefix: &str,
        filters: &S3Filters,
    ) -> AwsResult<()> {
        let target = single_quote(&local_dir.display().to_string());
        self.transfer("cp", &s3_uri(bucket, prefix), Some(&target), filters)
            .await
    }

    pub async fn remove(
        &mut self,
        bucket: &str,
        prefix: &str,
        filters: &S3Filters,
    ) -> AwsResult<()> {
        self.transfer("rm", &s3_uri(bucket, prefix), None, filters)
            .await
    }

    /// List buckets, or objects under `bucket[/prefix]`. Returns the raw listing.
    pub async fn ls(&mut self, bucket: Option<&str>, prefix: Option<&str>) -> AwsResult<String> {
        let mut cmd = "aws s3 ls --recursive --output yaml".to_string();
        if let Some(bucket) = bucket {
            cmd.push_str(&format!(" {}/", shell_escape(bucket)));
            if let Some(prefix) = prefix {
                cmd.push_str(&shell_escape(prefix));
            }
        }
        let result = self.runner.run(&cmd, ErrorPolicy::Stop).await?;
        Ok(result.output.to_stdout_string()?)
    }

    async fn transfer(
        &mut self,
        verb: &str,
        source: &str,
        target: Option<&str>,
        filters: &S3Filters,
    ) -> AwsResult<()> {
        let mut cmd_parts = vec![format!("aws s3 {}", verb), source.to_string()];
        if let Some(target) = target {
            cmd_parts.push(target.to_string());
        }
        cmd_parts.push("--recursive --output yaml".to_string());
        cmd_parts.extend(filters.flags());

        tracing::info!("s3 {} {} {}", verb, source, target.unwrap_or(""));
        self.runner
            .run(&cmd_parts.join(" "), ErrorPolicy::Stop)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::{recorded, MockExecutor};
    use std::sync::{Arc, Mutex};

    fn setup(commands: &[(&str, &str)]) -> (CommandRunner, Arc<Mutex<Vec<String>>>) {
        let mut mock = MockExecutor::new();
        for (cmd, stdout) in commands {
            mock.add_success(cmd, stdout);
        }
        let history = mock.history();
        (CommandRunner::new(mock).quiet(), history)
    }

    #[tokio::test]
    async fn test_upload_with_filters() {
        let cmd = "aws s3 cp './data' s3://my-bucket/reports/2024 --recursive --output yaml --exclude \\* --include \\*\\.txt";
        let (mut runner, history) = setup(&[(cmd, "")]);

        let filters = S3Filters {
            exclude: Some("*".to_string()),
            include: Some("*.txt".to_string()),
        };
        S3Cli::new(&mut runner)
            .upload(Path::new("./data"), "my-bucket", "reports/2024", &filters)
            .await
            .unwrap();

        assert_eq!(recorded(&history), vec![cmd]);
    }

    #[tokio::test]
    async fn test_upload_quotes_local_dir() {
        let cmd = "aws s3 cp '/tmp/quarterly reports/it'\\''s' s3://my-bucket/q3 --recursive --output yaml";
        let (mut runner, history) = setup(&[(cmd, "")]);

        S3Cli::new(&mut runner)
            .upload(
                Path::new("/tmp/quarterly reports/it's"),
                "my-bucket",
                "q3",
                &S3Filters::default(),
            )
            .await
            .unwrap();

        assert_eq!(recorded(&history), vec![cmd]);
    }

    #[tokio::test]
    async fn test_download_and_remove() {
        let download = "aws s3 cp s3://my-bucket/reports './downloads' --recursive --output yaml";
        let remove = "aws s3 rm s3://my-bucket/tmp --recursive --output yaml --include \\*\\.log";
        let (mut runner, history) = setup(&[(download, ""), (remove, "")]);

        let mut s3 = S3Cli::new(&mut runner);
        s3.download(Path::new("./downloads"), "my-bucket", "reports", &S3Filters::default())
            .await
            .unwrap();
        s3.remove(
            "my-bucket",
            "tmp",
            &S3Filters {
                exclude: None,
                include: Some("*.log".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(recorded(&history), vec![download, remove]);
    }

    #[tokio::test]
    async fn test_ls_variants() {
        let all = "aws s3 ls --recursive --output yaml";
        let bucket = "aws s3 ls --recursive --output yaml my\\-bucket/";
        let prefixed = "aws s3 ls --recursive --output yaml my\\-bucket/logs";
        let (mut runner, history) = setup(&[
            (all, "2024-01-01 00:00:00 my-bucket\n"),
            (bucket, ""),
            (prefixed, "2024-01-02 00:00:00 12 logs/a.log\n"),
        ]);

        let mut s3 = S3Cli::new(&mut runner);
        assert_eq!(
            s3.ls(None, None).await.unwrap(),
            "2024-01-01 00:00:00 my-bucket\n"
        );
        s3.ls(Some("my-bucket"), None).await.unwrap();
        // A prefix without a bucket is ignored.
        s3.ls(None, Some("logs")).await.unwrap();
        s3.ls(Some("my-bucket"), Some("logs")).await.unwrap();

        assert_eq!(recorded(&history), vec![all, bucket, all, prefixed]);
    }
}

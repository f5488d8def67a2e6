use super::common::build_runner;
use super::error::CliError;
use super::parser::Cli;
use super::ui;
use crate::aws::s3::s3_uri;
use crate::aws::{S3Cli, S3Filters};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

#[derive(Debug, Subcommand)]
pub enum S3Command {
    /// Recursively copy a local directory to s3://<bucket>/<prefix>
    Upload(Transfer),

    /// Recursively copy s3://<bucket>/<prefix> to a local directory
    Download(Transfer),

    /// Recursively delete objects under s3://<bucket>/<prefix>
    Rm {
        bucket: String,
        #[arg(default_value = "")]
        prefix: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List buckets, or the objects of a bucket recursively
    Ls {
        bucket: Option<String>,
        prefix: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct Transfer {
    /// Local directory
    local_dir: PathBuf,
    bucket: String,
    #[arg(default_value = "")]
    prefix: String,
    #[command(flatten)]
    filters: FilterArgs,
}

/// Wildcard filters; `--exclude` is applied before `--include`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Exclude objects matching the pattern
    #[arg(long)]
    exclude: Option<String>,
    /// Re-include objects matching the pattern
    #[arg(long)]
    include: Option<String>,
}

impl FilterArgs {
    fn to_filters(&self) -> S3Filters {
        S3Filters {
            exclude: self.exclude.clone(),
            include: self.include.clone(),
        }
    }
}

impl S3Command {
    #[instrument(name = "s3", skip_all)]
    pub async fn run(&self, cli: &Cli) -> Result<(), CliError> {
        let mut runner = build_runner(cli);
        let mut s3 = S3Cli::new(&mut runner);

        match self {
            S3Command::Upload(t) => {
                s3.upload(&t.local_dir, &t.bucket, &t.prefix, &t.filters.to_filters())
                    .await?;
                println!(
                    "{} {}",
                    ui::format_success("Uploaded to"),
                    ui::format_highlight(&s3_uri(&t.bucket, &t.prefix))
                );
            }
            S3Command::Download(t) => {
                s3.download(&t.local_dir, &t.bucket, &t.prefix, &t.filters.to_filters())
                    .await?;
                println!(
                    "{} {}",
                    ui::format_success("Downloaded to"),
                    ui::format_highlight(&t.local_dir.display().to_string())
                );
            }
            S3Command::Rm {
                bucket,
                prefix,
                filters,
                yes,
            } => {
                let uri = s3_uri(bucket, prefix);
                warn!("This will delete every matching object under {}", uri);
                let prompt = format!("Remove objects under {}?", ui::format_highlight(&uri));
                if !ui::confirm(&prompt, *yes)? {
                    info!("Removal cancelled by user.");
                    return Ok(());
                }
                s3.remove(bucket, prefix, &filters.to_filters()).await?;
                println!("{} {}", ui::format_success("Removed"), ui::format_highlight(&uri));
            }
            S3Command::Ls { bucket, prefix } => {
                let listing = s3.ls(bucket.as_deref(), prefix.as_deref()).await?;
                if cli.quiet {
                    print!("{}", listing);
                }
            }
        }
        Ok(())
    }
}

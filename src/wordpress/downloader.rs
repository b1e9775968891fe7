//! Core download invoker
//!
//! Fetching and extracting a release is delegated to wp-cli:
//! `wp core download --version=<version> --path=<target>`, run from the
//! project root so that its `wp-cli.yml` applies.

#[cfg(test)]
use mockall::automock;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::version::types::ReleaseVersion;
use crate::wordpress::error::InstallError;

/// Trait for fetching a WordPress release into a directory
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CoreDownloader: Send + Sync {
    /// Download and extract `version` into `target`
    ///
    /// `target` exists and is empty when this is called.
    async fn download(&self, version: &ReleaseVersion, target: &Path) -> Result<(), InstallError>;
}

/// Downloader that shells out to wp-cli
pub struct WpCliDownloader {
    program: PathBuf,
    working_dir: PathBuf,
    timeout: Duration,
}

impl WpCliDownloader {
    pub fn new(
        program: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            timeout,
        }
    }

    fn args(version: &ReleaseVersion, target: &Path) -> Vec<String> {
        vec![
            "core".to_string(),
            "download".to_string(),
            format!("--version={}", version),
            format!("--path={}", target.display()),
        ]
    }
}

#[async_trait::async_trait]
impl CoreDownloader for WpCliDownloader {
    async fn download(&self, version: &ReleaseVersion, target: &Path) -> Result<(), InstallError> {
        let program = self.program.display().to_string();
        let args = Self::args(version, target);
        debug!("Running {} {}", program, args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| InstallError::Spawn {
                program: program.clone(),
                source,
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| InstallError::Spawn {
                program: program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(InstallError::Timeout {
                    version: version.to_string(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            return Err(InstallError::Failed {
                version: version.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Downloaded WordPress {} into {}", version, target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn args_pass_version_and_path() {
        let args = WpCliDownloader::args(&ReleaseVersion::new("4.9.8"), Path::new("/tmp/wp"));

        assert_eq!(
            args,
            vec!["core", "download", "--version=4.9.8", "--path=/tmp/wp"]
        );
    }

    #[tokio::test]
    async fn download_reports_missing_program() {
        let target = TempDir::new().unwrap();
        let downloader = WpCliDownloader::new(
            "/nonexistent/bin/wp-cli-missing",
            target.path(),
            Duration::from_secs(5),
        );

        let result = downloader
            .download(&ReleaseVersion::new("4.9.8"), target.path())
            .await;

        assert!(matches!(result, Err(InstallError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn download_reports_non_zero_exit() {
        let target = TempDir::new().unwrap();
        let downloader = WpCliDownloader::new("false", target.path(), Duration::from_secs(5));

        let result = downloader
            .download(&ReleaseVersion::new("4.9.8"), target.path())
            .await;

        assert!(matches!(result, Err(InstallError::Failed { ref version, .. }) if version == "4.9.8"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn download_runs_from_working_dir() {
        // `sh core ...` executes the script named `core` relative to the cwd
        let root = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        std::fs::write(root.path().join("core"), "pwd > cwd.txt\n").unwrap();
        let downloader = WpCliDownloader::new("sh", root.path(), Duration::from_secs(5));

        downloader
            .download(&ReleaseVersion::new("4.9.8"), target.path())
            .await
            .unwrap();

        assert!(root.path().join("cwd.txt").is_file());
        assert!(!target.path().join("cwd.txt").exists());
    }
}

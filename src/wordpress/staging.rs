//! Release staging
//!
//! A release is downloaded into its own scratch directory first and copied
//! over the live root only once the download has fully succeeded.

use std::path::Path;

use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

use crate::version::types::ReleaseVersion;
use crate::wordpress::downloader::CoreDownloader;
use crate::wordpress::error::{InstallError, StageError};
use crate::wordpress::manifest::{create_scratch_dir, remove_scratch_dir};

/// A fully downloaded release waiting in scratch space
#[derive(Debug)]
pub struct StagedRelease {
    version: ReleaseVersion,
    dir: TempDir,
}

impl StagedRelease {
    /// Download `version` into a fresh scratch directory under `scratch_root`
    pub async fn download(
        downloader: &dyn CoreDownloader,
        version: &ReleaseVersion,
        scratch_root: &Path,
    ) -> Result<Self, StageError> {
        let dir = create_scratch_dir(scratch_root, "staging")?;
        debug!("Staging WordPress {} in {}", version, dir.path().display());

        downloader.download(version, dir.path()).await?;

        Ok(Self {
            version: version.clone(),
            dir,
        })
    }

    pub fn version(&self) -> &ReleaseVersion {
        &self.version
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy the staged tree over `root`, overwriting files that exist.
    ///
    /// Consumes the stage and removes its scratch directory. Returns the
    /// number of files copied.
    pub fn install_into(self, root: &Path) -> Result<usize, StageError> {
        let Self { version, dir } = self;

        let copied = copy_tree(dir.path(), root)?;
        debug!("Copied {} files of {} into {}", copied, version, root.display());

        remove_scratch_dir(dir)?;
        Ok(copied)
    }
}

fn copy_tree(source: &Path, target: &Path) -> Result<usize, InstallError> {
    let stage_err = |path: &Path, err: std::io::Error| InstallError::Stage {
        path: path.to_path_buf(),
        source: err,
    };

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            stage_err(&path, e.into())
        })?;

        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&destination).map_err(|e| stage_err(&destination, e))?;
        } else {
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent).map_err(|e| stage_err(parent, e))?;
            }
            std::fs::copy(entry.path(), &destination).map_err(|e| stage_err(&destination, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordpress::downloader::MockCoreDownloader;
    use crate::wordpress::error::ScratchError;

    fn write_release(target: &Path) {
        for (file, body) in [
            ("index.php", "<?php // 5.0.0"),
            ("wp-admin/index.php", "<?php // admin"),
            ("wp-includes/version.php", "<?php\n$wp_version = '5.0.0';\n"),
        ] {
            let path = target.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
    }

    #[tokio::test]
    async fn install_into_copies_release_and_keeps_existing_files() {
        let scratch = TempDir::new().unwrap();
        let live = TempDir::new().unwrap();
        std::fs::create_dir_all(live.path().join("wp-content/themes/custom")).unwrap();
        std::fs::write(live.path().join("wp-content/themes/custom/style.css"), "body{}").unwrap();
        std::fs::write(live.path().join("index.php"), "<?php // old").unwrap();

        let mut downloader = MockCoreDownloader::new();
        downloader
            .expect_download()
            .times(1)
            .returning(|_, target| {
                write_release(target);
                Ok(())
            });

        let staged =
            StagedRelease::download(&downloader, &ReleaseVersion::new("5.0.0"), scratch.path())
                .await
                .unwrap();
        let stage_path = staged.path().to_path_buf();

        let copied = staged.install_into(live.path()).unwrap();

        assert_eq!(copied, 3);
        assert!(!stage_path.exists());
        assert_eq!(
            std::fs::read_to_string(live.path().join("index.php")).unwrap(),
            "<?php // 5.0.0"
        );
        assert!(live.path().join("wp-admin/index.php").is_file());
        assert!(live.path().join("wp-content/themes/custom/style.css").is_file());
    }

    #[tokio::test]
    async fn download_failure_removes_stage_and_reports_install_error() {
        let scratch = TempDir::new().unwrap();
        let mut downloader = MockCoreDownloader::new();
        downloader.expect_download().times(1).returning(|v, _| {
            Err(InstallError::Failed {
                version: v.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "Error: Release not found".to_string(),
            })
        });

        let result =
            StagedRelease::download(&downloader, &ReleaseVersion::new("9.9.9"), scratch.path())
                .await;

        assert!(matches!(result, Err(StageError::Install(InstallError::Failed { .. }))));
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn install_into_reports_stage_that_cannot_be_removed() {
        let scratch = TempDir::new().unwrap();
        let live = TempDir::new().unwrap();
        let mut downloader = MockCoreDownloader::new();
        downloader.expect_download().times(1).returning(|_, target| {
            std::fs::remove_dir(target).unwrap();
            std::fs::write(target, "").unwrap();
            Ok(())
        });

        let staged =
            StagedRelease::download(&downloader, &ReleaseVersion::new("5.0.0"), scratch.path())
                .await
                .unwrap();
        let stage_path = staged.path().to_path_buf();

        let result = staged.install_into(live.path());

        assert!(matches!(
            result,
            Err(StageError::Scratch(ScratchError::Remove { ref path, .. })) if *path == stage_path
        ));
        assert!(stage_path.exists());
    }
}

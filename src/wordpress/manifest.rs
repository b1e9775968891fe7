//! Stock file manifests
//!
//! The file set of a release differs subtly from one version to the next, so
//! the manifest of an installed release is obtained by downloading that exact
//! release into a scratch directory and listing it.

#[cfg(test)]
use mockall::automock;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

use crate::version::types::ReleaseVersion;
use crate::wordpress::downloader::CoreDownloader;
use crate::wordpress::error::ScratchError;

/// Relative paths of every file shipped with one release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledManifest {
    files: BTreeSet<PathBuf>,
}

impl InstalledManifest {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// List every regular file under `dir`, relative to `dir`
    pub fn from_dir(dir: &Path) -> Result<Self, ScratchError> {
        let mut files = BTreeSet::new();

        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(dir) {
                files.insert(relative.to_path_buf());
            }
        }

        Ok(Self { files })
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Source of stock file manifests
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ManifestSource: Send + Sync {
    async fn manifest(&self, version: &ReleaseVersion) -> Result<InstalledManifest, ScratchError>;
}

/// Builds manifests by downloading the release into a scratch directory.
///
/// The scratch directory is removed before this call returns. On success a
/// failed removal is reported as [`ScratchError::Remove`]; on earlier
/// failures the `TempDir` drop cleans up on a best-effort basis.
pub struct DownloadManifestSource {
    downloader: Arc<dyn CoreDownloader>,
    scratch_root: PathBuf,
}

impl DownloadManifestSource {
    pub fn new(downloader: Arc<dyn CoreDownloader>, scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            downloader,
            scratch_root: scratch_root.into(),
        }
    }
}

#[async_trait::async_trait]
impl ManifestSource for DownloadManifestSource {
    async fn manifest(&self, version: &ReleaseVersion) -> Result<InstalledManifest, ScratchError> {
        let scratch = create_scratch_dir(&self.scratch_root, "reference")?;
        debug!(
            "Downloading reference copy of {} into {}",
            version,
            scratch.path().display()
        );

        self.downloader
            .download(version, scratch.path())
            .await
            .map_err(ScratchError::Download)?;

        let manifest = InstalledManifest::from_dir(scratch.path())?;
        debug!("Release {} ships {} files", version, manifest.len());

        remove_scratch_dir(scratch)?;
        Ok(manifest)
    }
}

/// Create a uniquely named scratch directory under `parent`
pub fn create_scratch_dir(parent: &Path, purpose: &str) -> Result<tempfile::TempDir, ScratchError> {
    std::fs::create_dir_all(parent).map_err(|source| ScratchError::Create {
        parent: parent.to_path_buf(),
        source,
    })?;

    tempfile::Builder::new()
        .prefix(&format!("wp-tasks-{purpose}-"))
        .tempdir_in(parent)
        .map_err(|source| ScratchError::Create {
            parent: parent.to_path_buf(),
            source,
        })
}

/// Delete a scratch directory, reporting failures instead of ignoring them
pub fn remove_scratch_dir(dir: tempfile::TempDir) -> Result<(), ScratchError> {
    let path = dir.path().to_path_buf();
    dir.close().map_err(|source| ScratchError::Remove { path, source })
}

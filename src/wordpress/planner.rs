//! Upgrade diff planning
//!
//! Before a new release goes in, every live file that belongs to the stock
//! distribution of the installed release is removed. Files are matched by
//! relative path only, so a locally modified core file is reset as well.
//! Anything the manifest does not list (themes, plugins, uploads) is left
//! alone, except that `wp-admin` and `wp-includes` are always removed
//! wholesale.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::version::types::ReleaseVersion;
use crate::wordpress::error::{FsError, ScratchError};
use crate::wordpress::manifest::ManifestSource;

/// Core directories removed on every upgrade
pub const CORE_DIRECTORIES: [&str; 2] = ["wp-admin", "wp-includes"];

/// Live paths to delete before installing another release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    /// Stock files present in the live root, relative to it
    pub files: Vec<PathBuf>,
    /// Directories removed unconditionally, relative to the live root
    pub directories: Vec<PathBuf>,
}

impl RemovalPlan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Delete every planned path under `root`.
    ///
    /// Entries that have already disappeared are skipped. Returns the
    /// number of paths actually removed.
    pub fn apply(&self, root: &Path) -> Result<usize, FsError> {
        let mut removed = 0;

        for file in &self.files {
            let path = root.join(file);
            if remove_if_present(&path, |p| std::fs::remove_file(p))? {
                removed += 1;
            }
        }

        for dir in &self.directories {
            let path = root.join(dir);
            if remove_if_present(&path, |p| std::fs::remove_dir_all(p))? {
                removed += 1;
            }
        }

        info!("Removed {} stock paths from {}", removed, root.display());
        Ok(removed)
    }
}

fn remove_if_present(path: &Path, remove: fn(&Path) -> io::Result<()>) -> Result<bool, FsError> {
    match remove(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub struct UpgradeDiffPlanner {
    manifests: Arc<dyn ManifestSource>,
}

impl UpgradeDiffPlanner {
    pub fn new(manifests: Arc<dyn ManifestSource>) -> Self {
        Self { manifests }
    }

    /// Work out which live files belong to `installed`'s stock distribution
    pub async fn plan_removal(
        &self,
        installed: &ReleaseVersion,
        live_root: &Path,
    ) -> Result<RemovalPlan, ScratchError> {
        let manifest = self.manifests.manifest(installed).await?;

        let files: Vec<PathBuf> = manifest
            .files()
            .filter(|file| live_root.join(file).is_file())
            .map(Path::to_path_buf)
            .collect();

        debug!(
            "{} of {} stock files of {} are present in {}",
            files.len(),
            manifest.len(),
            installed,
            live_root.display()
        );

        Ok(RemovalPlan {
            files,
            directories: CORE_DIRECTORIES.iter().map(PathBuf::from).collect(),
        })
    }
}

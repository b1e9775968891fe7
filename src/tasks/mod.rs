//! Task orchestration
//!
//! Each task is a short sequence over the collaborators grouped in
//! [`Services`]:
//!
//! - install: resolve, stage, copy into the project root, prune
//! - update: compare installed and target releases; on a difference stage
//!   the target, remove the stock files of the installed release, then
//!   copy the target in
//! - salts: write fresh security salts
//! - permissions: make upload directories writable

pub mod error;
pub mod permissions;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::TasksConfig;
use crate::salts::{SaltSource, SaltsClient, write_salts};
use crate::tasks::error::TaskError;
use crate::version::registries::WordPressOrgRegistry;
use crate::version::registry::ReleaseRegistry;
use crate::version::resolver::VersionResolver;
use crate::version::types::ReleaseVersion;
use crate::wordpress::downloader::{CoreDownloader, WpCliDownloader};
use crate::wordpress::installation::Installation;
use crate::wordpress::manifest::{DownloadManifestSource, ManifestSource};
use crate::wordpress::planner::UpgradeDiffPlanner;
use crate::wordpress::prune::prune_install;
use crate::wordpress::staging::StagedRelease;

/// External collaborators used by the tasks
pub struct Services {
    pub registry: Arc<dyn ReleaseRegistry>,
    pub downloader: Arc<dyn CoreDownloader>,
    pub manifests: Arc<dyn ManifestSource>,
    pub salts: Arc<dyn SaltSource>,
}

impl Services {
    /// Create the production collaborators for a project
    pub fn from_config(config: &TasksConfig, root: &Path) -> Result<Self, TaskError> {
        let registry = WordPressOrgRegistry::new(
            &config.endpoints.version_check,
            &config.endpoints.release_archive,
            config.fetch_timeout(),
        )?;
        let salts = SaltsClient::new(&config.endpoints.salts, config.fetch_timeout())?;

        let downloader: Arc<dyn CoreDownloader> = Arc::new(WpCliDownloader::new(
            wp_cli_program(&config.wp_cli, root),
            root,
            config.download_timeout(),
        ));
        let manifests = Arc::new(DownloadManifestSource::new(
            downloader.clone(),
            config.scratch_root(root),
        ));

        Ok(Self {
            registry: Arc::new(registry),
            downloader,
            manifests,
            salts: Arc::new(salts),
        })
    }
}

/// Bare program names are looked up on PATH; paths resolve against the root
fn wp_cli_program(configured: &Path, root: &Path) -> PathBuf {
    if configured.is_relative() && configured.components().count() > 1 {
        root.join(configured)
    } else {
        configured.to_path_buf()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The version sentinel already exists, nothing was touched
    AlreadyInstalled,
    Installed { version: ReleaseVersion },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing was installed, so a fresh install ran instead
    Installed { version: ReleaseVersion },
    UpToDate { version: ReleaseVersion },
    Updated {
        from: ReleaseVersion,
        to: ReleaseVersion,
        removed: usize,
    },
}

pub struct Tasks {
    installation: Installation,
    config: TasksConfig,
    resolver: VersionResolver,
    services: Services,
}

impl Tasks {
    pub fn new(root: impl Into<PathBuf>, config: TasksConfig, services: Services) -> Self {
        Self {
            installation: Installation::new(root),
            resolver: VersionResolver::new(services.registry.clone()),
            config,
            services,
        }
    }

    pub fn root(&self) -> &Path {
        self.installation.root()
    }

    /// Download core files matching `constraint` unless WordPress is already installed
    pub async fn install(&self, constraint: &str) -> Result<InstallOutcome, TaskError> {
        if self.installation.is_installed() {
            info!(
                "WordPress already installed in {}, skipping",
                self.root().display()
            );
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let version = self.resolver.resolve(constraint).await?;
        self.install_release(&version).await?;

        Ok(InstallOutcome::Installed { version })
    }

    /// Move the installation to the release matching `constraint`
    pub async fn update(&self, constraint: &str) -> Result<UpdateOutcome, TaskError> {
        let Some(installed) = self.installation.installed_version()? else {
            let version = self.resolver.resolve(constraint).await?;
            self.install_release(&version).await?;
            return Ok(UpdateOutcome::Installed { version });
        };

        let target = self.resolver.resolve(constraint).await?;
        if installed.same_release(&target) {
            info!("WordPress {} is already installed", installed);
            return Ok(UpdateOutcome::UpToDate { version: installed });
        }
        debug!("Updating {} -> {}", installed, target);

        let staged = self.stage(&target).await?;

        let planner = UpgradeDiffPlanner::new(self.services.manifests.clone());
        let plan = planner.plan_removal(&installed, self.root()).await?;
        let removed = plan.apply(self.root())?;

        self.finish_install(staged)?;
        info!("Updated WordPress {} -> {}", installed, target);

        Ok(UpdateOutcome::Updated {
            from: installed,
            to: target,
            removed,
        })
    }

    /// Write a fresh set of salts. Returns the salts file path.
    pub async fn generate_salts(&self) -> Result<PathBuf, TaskError> {
        let path = self.root().join(&self.config.salts_file);
        write_salts(self.services.salts.as_ref(), &path).await?;
        Ok(path)
    }

    /// Create the writable directories and open up their permissions
    pub fn fix_permissions(&self) -> Result<Vec<PathBuf>, TaskError> {
        Ok(permissions::make_writable(
            self.root(),
            &self.config.writable_dirs,
        )?)
    }

    async fn install_release(&self, version: &ReleaseVersion) -> Result<(), TaskError> {
        let staged = self.stage(version).await?;
        self.finish_install(staged)?;
        info!("Installed WordPress {} in {}", version, self.root().display());
        Ok(())
    }

    async fn stage(&self, version: &ReleaseVersion) -> Result<StagedRelease, TaskError> {
        StagedRelease::download(
            self.services.downloader.as_ref(),
            version,
            &self.config.scratch_root(self.root()),
        )
        .await
        .map_err(TaskError::from)
    }

    fn finish_install(&self, staged: StagedRelease) -> Result<(), TaskError> {
        let version = staged.version().clone();
        let copied = staged.install_into(self.root())?;
        let pruned = prune_install(self.root(), &self.config.prune)?;
        debug!(
            "WordPress {}: {} files copied, {} paths pruned",
            version,
            copied,
            pruned.len()
        );
        Ok(())
    }
}

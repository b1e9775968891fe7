//! Collaborator fakes for end-to-end task tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use wp_tasks::config::TasksConfig;
use wp_tasks::salts::SaltSource;
use wp_tasks::tasks::{Services, Tasks};
use wp_tasks::version::error::FetchError;
use wp_tasks::version::registry::ReleaseRegistry;
use wp_tasks::version::types::{ReleaseCatalog, ReleaseVersion};
use wp_tasks::wordpress::downloader::CoreDownloader;
use wp_tasks::wordpress::error::InstallError;
use wp_tasks::wordpress::manifest::DownloadManifestSource;

/// In-memory registry that counts network round-trips
#[derive(Default)]
pub struct FakeRegistry {
    latest: Option<String>,
    catalog: Vec<String>,
    pub latest_calls: AtomicUsize,
    pub catalog_calls: AtomicUsize,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latest(mut self, version: &str) -> Self {
        self.latest = Some(version.to_string());
        self
    }

    pub fn with_catalog(mut self, versions: Vec<&str>) -> Self {
        self.catalog = versions.into_iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn calls(&self) -> usize {
        self.latest_calls.load(Ordering::SeqCst) + self.catalog_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseRegistry for FakeRegistry {
    async fn fetch_latest_version(&self) -> Result<String, FetchError> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        self.latest
            .clone()
            .ok_or_else(|| FetchError::InvalidResponse("no offers".to_string()))
    }

    async fn fetch_release_catalog(&self) -> Result<ReleaseCatalog, FetchError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ReleaseCatalog::new(self.catalog.clone()))
    }
}

/// Downloader that writes a fixed file set per release
#[derive(Default)]
pub struct FixtureDownloader {
    releases: HashMap<String, Vec<(String, String)>>,
    downloads: Mutex<Vec<String>>,
}

impl FixtureDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a release; `version.php` is added automatically
    pub fn with_release(mut self, version: &str, files: Vec<&str>) -> Self {
        let mut entries: Vec<(String, String)> = files
            .into_iter()
            .map(|f| (f.to_string(), format!("<?php // {} {}", f, version)))
            .collect();
        entries.push((
            "wp-includes/version.php".to_string(),
            format!("<?php\n$wp_version = '{}';\n", version),
        ));
        self.releases.insert(version.to_string(), entries);
        self
    }

    /// Versions downloaded so far, in call order
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoreDownloader for FixtureDownloader {
    async fn download(&self, version: &ReleaseVersion, target: &Path) -> Result<(), InstallError> {
        self.downloads.lock().unwrap().push(version.to_string());

        let Some(files) = self.releases.get(version.as_str()) else {
            return Err(InstallError::Failed {
                version: version.to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("Error: Release {} not found", version),
            });
        };

        for (file, body) in files {
            write_file(target, file, body);
        }
        Ok(())
    }
}

pub struct NoSalts;

#[async_trait]
impl SaltSource for NoSalts {
    async fn fetch_salts(&self) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::InvalidResponse("salts not expected".to_string()))
    }
}

/// A project root and scratch space wired to the fakes
pub struct TestProject {
    pub root: TempDir,
    pub scratch: TempDir,
    pub registry: Arc<FakeRegistry>,
    pub downloader: Arc<FixtureDownloader>,
}

impl TestProject {
    pub fn new(registry: FakeRegistry, downloader: FixtureDownloader) -> Self {
        Self {
            root: TempDir::new().unwrap(),
            scratch: TempDir::new().unwrap(),
            registry: Arc::new(registry),
            downloader: Arc::new(downloader),
        }
    }

    pub fn tasks(&self) -> Tasks {
        let config = TasksConfig {
            scratch_dir: Some(self.scratch.path().to_path_buf()),
            ..TasksConfig::default()
        };
        let services = Services {
            registry: self.registry.clone(),
            downloader: self.downloader.clone(),
            manifests: Arc::new(DownloadManifestSource::new(
                self.downloader.clone(),
                self.scratch.path(),
            )),
            salts: Arc::new(NoSalts),
        };
        Tasks::new(self.root.path(), config, services)
    }

    pub fn write(&self, relative: &str, body: &str) {
        write_file(self.root.path(), relative, body);
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root.path().join(relative).exists()
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root.path().join(relative)).unwrap()
    }

    /// Number of entries left in scratch space
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }
}

fn write_file(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

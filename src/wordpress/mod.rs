//! WordPress core file management
//!
//! # Modules
//!
//! - [`downloader`]: `CoreDownloader` trait and the wp-cli invoker
//! - [`error`]: Error types for scratch space and core downloads
//! - [`installation`]: Installed-version detection
//! - [`manifest`]: Stock file manifests built from reference downloads
//! - [`planner`]: Removal plans for upgrades
//! - [`prune`]: Cleanup of sample files and bundled extras
//! - [`staging`]: Download-then-copy installation

pub mod downloader;
pub mod error;
pub mod installation;
pub mod manifest;
pub mod planner;
pub mod prune;
pub mod staging;

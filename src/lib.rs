//! Build tasks for bootstrapping and upgrading WordPress installations
//!
//! - [`version`]: resolves version constraints against wordpress.org
//! - [`wordpress`]: installs, diffs and prunes core files
//! - [`tasks`]: the install, update, salts and permissions tasks
//! - [`salts`]: security salt generation
//! - [`config`]: constants and the JSON config file

pub mod config;
pub mod http;
pub mod logging;
pub mod salts;
pub mod tasks;
pub mod version;
pub mod wordpress;

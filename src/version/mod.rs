//! Release version resolution
//!
//! This module turns a user-supplied constraint into a concrete WordPress
//! release number.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Resolver   │◀────│ Constraint  │
//! │  (fetch)    │     │  (select)   │     │  (match)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   Catalog   │
//! │  (scrape)   │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Release archive HTML scraping
//! - [`constraint`]: Constraint parsing and matching
//! - [`error`]: Error types for fetching and resolution
//! - [`registry`]: Registry trait for fetching release data
//! - [`registries`]: Concrete registry implementations (wordpress.org)
//! - [`resolver`]: Constraint to release resolution
//! - [`semver`]: Release number ordering helpers
//! - [`types`]: `ReleaseVersion` and `ReleaseCatalog`

pub mod catalog;
pub mod constraint;
pub mod error;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;
pub mod types;

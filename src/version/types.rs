use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexSet;

use crate::version::semver::compare_releases;

/// A concrete WordPress release number, e.g. `4.9.8`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stable releases carry no hyphenated pre-release suffix.
    pub fn is_stable(&self) -> bool {
        is_stable(&self.0)
    }

    /// Whether both numbers name the same release (`5.0` and `5.0.0` do).
    pub fn same_release(&self, other: &ReleaseVersion) -> bool {
        compare_releases(&self.0, &other.0) == Ordering::Equal
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_stable(version: &str) -> bool {
    !version.contains('-')
}

/// Release numbers scraped from the release archive, in page order.
///
/// Entries are unique; the first occurrence decides the position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseCatalog {
    versions: IndexSet<String>,
}

impl ReleaseCatalog {
    pub fn new<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.versions.iter().map(String::as_str)
    }

    /// Entries without a hyphenated suffix.
    pub fn stable(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|v| is_stable(v))
    }
}

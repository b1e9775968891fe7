//! Version constraint parsing
//!
//! Supported forms:
//! - `*` - the latest stable release, as advertised by the version-check API
//! - `4.*`, `4.9.*`, `4.x` - wildcard patterns, anchored at both ends
//! - `4.9.8` - exact release
//! - `^4.9`, `>=4.7, <5` - semver ranges
//!
//! A single leading `v` is ignored (`v4.9.*` == `4.9.*`).

use regex::Regex;
use semver::VersionReq;

use crate::version::error::ResolutionError;
use crate::version::semver::{pad_version, parse_version};

const RANGE_OPERATORS: [char; 5] = ['^', '~', '>', '<', '='];

#[derive(Debug, Clone)]
pub enum VersionConstraint {
    /// Bare `*`
    Latest,
    /// Wildcard or exact token, compiled to an anchored case-insensitive regex
    Pattern { raw: String, regex: Regex },
    /// Operator-based range
    Range { raw: String, req: VersionReq },
}

impl VersionConstraint {
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let trimmed = input.trim();
        let raw = trimmed.strip_prefix('v').unwrap_or(trimmed);

        if raw.is_empty() {
            return Err(ResolutionError::InvalidConstraint(input.to_string()));
        }

        if raw == "*" {
            return Ok(VersionConstraint::Latest);
        }

        if raw.starts_with(&RANGE_OPERATORS[..]) || raw.contains(',') {
            let req = VersionReq::parse(raw)
                .map_err(|_| ResolutionError::InvalidConstraint(input.to_string()))?;
            return Ok(VersionConstraint::Range {
                raw: raw.to_string(),
                req,
            });
        }

        let regex = Regex::new(&pattern_source(raw))
            .map_err(|_| ResolutionError::InvalidConstraint(input.to_string()))?;

        Ok(VersionConstraint::Pattern {
            raw: raw.to_string(),
            regex,
        })
    }

    /// The constraint text with any leading `v` removed
    pub fn as_str(&self) -> &str {
        match self {
            VersionConstraint::Latest => "*",
            VersionConstraint::Pattern { raw, .. } => raw,
            VersionConstraint::Range { raw, .. } => raw,
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, VersionConstraint::Latest)
    }

    /// Check whether a catalog entry satisfies this constraint.
    ///
    /// Patterns are tried against the entry as listed and against its
    /// three-segment form, so `4.9.*` accepts the `4.9` release.
    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionConstraint::Latest => true,
            VersionConstraint::Pattern { regex, .. } => {
                regex.is_match(version) || regex.is_match(&pad_version(version))
            }
            VersionConstraint::Range { req, .. } => {
                parse_version(version).is_some_and(|v| req.matches(&v))
            }
        }
    }
}

/// Translate a wildcard token into an anchored regex source.
///
/// `*` and whole `x`/`X` segments match any run of characters; everything
/// else is literal.
fn pattern_source(raw: &str) -> String {
    let segments: Vec<String> = raw
        .split('.')
        .map(|segment| {
            if segment.eq_ignore_ascii_case("x") {
                ".*".to_string()
            } else {
                segment
                    .split('*')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".*")
            }
        })
        .collect();

    format!("(?i)^{}$", segments.join(r"\."))
}

use std::cmp::Ordering;

use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "4" or "4.9" by padding with zeros.
/// Does NOT strip 'v' prefix.
///
/// Examples:
/// - "4" -> Version(4, 0, 0)
/// - "4.9" -> Version(4, 9, 0)
/// - "4.9.8" -> Version(4, 9, 8)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Pad a dotted version to at least three segments ("4.9" -> "4.9.0").
pub fn pad_version(version: &str) -> String {
    match version.split('.').count() {
        1 => format!("{}.0.0", version),
        2 => format!("{}.0", version),
        _ => version.to_string(),
    }
}

/// Numeric segments of a dotted release number.
///
/// WordPress has shipped four-segment releases (e.g. "1.5.1.3"), which
/// semver cannot represent, so ordering works on raw segments instead.
/// Non-numeric segments count as zero.
fn segments(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|s| s.parse::<u64>().unwrap_or(0))
        .collect()
}

/// Compare two release numbers segment by segment, treating missing
/// trailing segments as zero ("4.9" == "4.9.0").
pub fn compare_releases(a: &str, b: &str) -> Ordering {
    let a = segments(a);
    let b = segments(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Find the highest release number from a list.
///
/// Ties keep the entry that appears last, so the result only depends on
/// the list contents and order.
pub fn find_highest<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .max_by(|a, b| compare_releases(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("4", Some(Version::new(4, 0, 0)))]
    #[case("4.9", Some(Version::new(4, 9, 0)))]
    #[case("4.9.8", Some(Version::new(4, 9, 8)))]
    #[case("1.5.1.3", None)]
    #[case("invalid", None)]
    fn parse_version_normalizes_partial_versions(
        #[case] input: &str,
        #[case] expected: Option<Version>,
    ) {
        assert_eq!(parse_version(input), expected);
    }

    #[rstest]
    #[case("4.9.10", "4.9.8", Ordering::Greater)]
    #[case("4.10.0", "4.9.10", Ordering::Greater)]
    #[case("4.9", "4.9.0", Ordering::Equal)]
    #[case("1.5.1.3", "1.5.1", Ordering::Greater)]
    #[case("3.0", "3.0.1", Ordering::Less)]
    fn compare_releases_orders_by_numeric_segments(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_releases(a, b), expected);
    }

    #[rstest]
    #[case(vec![], None)]
    #[case(vec!["4.9.1", "4.9.8", "4.8.0"], Some("4.9.8"))]
    #[case(vec!["4.9.8", "4.9.10", "4.9.9"], Some("4.9.10"))]
    #[case(vec!["2.0", "1.5.1.3"], Some("2.0"))]
    fn find_highest_returns_expected(#[case] versions: Vec<&str>, #[case] expected: Option<&str>) {
        assert_eq!(find_highest(versions), expected);
    }

    #[test]
    fn pad_version_appends_missing_segments() {
        assert_eq!(pad_version("5"), "5.0.0");
        assert_eq!(pad_version("5.0"), "5.0.0");
        assert_eq!(pad_version("5.0.1"), "5.0.1");
    }
}

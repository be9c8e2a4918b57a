//! core::version
//!
//! Release-version parsing and prediction.
//!
//! # Design
//!
//! Two version strings drive a run, and they come from different places:
//!
//! - The **anchor version** is predicted from the changelog: the most recent
//!   `##` heading names the last version that was written into the changelog,
//!   so the last *released* version is that heading with its patch component
//!   incremented. The anchor is only a search string used to locate the
//!   last-release commit; it is never displayed.
//! - The **new release version** is read verbatim from the `Bundle-Version`
//!   line of the build-metadata file at a historical commit.
//!
//! Anchor matching downstream is a raw substring check. A coincidental match
//! in unrelated metadata content would produce a false anchor; that looseness
//! is part of the contract and deliberately kept.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref VERSION_PATTERN: Regex = Regex::new(r"[0-9]+\.[0-9]+\.([0-9]+)").unwrap();
    static ref BUNDLE_VERSION_PATTERN: Regex = Regex::new(r"Bundle-Version:\s*(.*)").unwrap();
}

/// Errors from version parsing.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The changelog contains no `##` version heading.
    #[error("changelog has no `##` version heading")]
    MissingHeading,

    /// The heading's version has no parseable `MAJOR.MINOR.PATCH` component.
    #[error("version heading is not MAJOR.MINOR.PATCH: {version:?}")]
    UnparseablePatch {
        /// The heading text that failed to parse
        version: String,
    },
}

/// Predict the last released version from the changelog text.
///
/// Reads the first `##`-prefixed line, takes everything after the marker as
/// the version string, and increments its patch component by one. Only the
/// patch component is replaced; other occurrences of the same digits are left
/// alone (`4.1.4` predicts `4.1.5`, not `5.1.5`).
///
/// # Errors
///
/// - [`VersionError::MissingHeading`] if no `##` line exists
/// - [`VersionError::UnparseablePatch`] if the heading has no version triple
pub fn last_released_version(changelog: &str) -> Result<String, VersionError> {
    let heading = changelog
        .lines()
        .find_map(|line| line.strip_prefix("##"))
        .ok_or(VersionError::MissingHeading)?;

    let version = heading.trim();

    let captures = VERSION_PATTERN
        .captures(version)
        .ok_or_else(|| VersionError::UnparseablePatch {
            version: version.to_string(),
        })?;

    let patch = captures.get(1).expect("pattern has one capture group");
    let patch_number: u64 =
        patch
            .as_str()
            .parse()
            .map_err(|_| VersionError::UnparseablePatch {
                version: version.to_string(),
            })?;

    let mut predicted = String::with_capacity(version.len() + 1);
    predicted.push_str(&version[..patch.start()]);
    predicted.push_str(&(patch_number + 1).to_string());
    predicted.push_str(&version[patch.end()..]);

    Ok(predicted)
}

/// Extract the `Bundle-Version` value from build-metadata content.
///
/// Returns `None` if no `Bundle-Version:` line is present.
pub fn bundle_version(content: &str) -> Option<String> {
    BUNDLE_VERSION_PATTERN
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_patch_increment() {
        let changelog = "# Poshi Runner Change Log\n\n## 3.1.4\n\n### Other\n";
        assert_eq!(last_released_version(changelog).unwrap(), "3.1.5");
    }

    #[test]
    fn predicts_across_digit_boundary() {
        let changelog = "# Title\n\n## 1.2.19\n";
        assert_eq!(last_released_version(changelog).unwrap(), "1.2.20");
    }

    #[test]
    fn replaces_only_the_patch_component() {
        // The patch digits also appear in the major component; only the
        // patch position may change.
        let changelog = "## 4.1.4\n";
        assert_eq!(last_released_version(changelog).unwrap(), "4.1.5");
    }

    #[test]
    fn skips_non_heading_lines() {
        let changelog = "# Title\nsome prose mentioning 9.9.9\n## 2.0.0\n";
        assert_eq!(last_released_version(changelog).unwrap(), "2.0.1");
    }

    #[test]
    fn tolerates_whitespace_after_marker() {
        assert_eq!(last_released_version("##   2.0.0  \n").unwrap(), "2.0.1");
    }

    #[test]
    fn missing_heading_is_an_error() {
        let err = last_released_version("# Title\nno headings here\n").unwrap_err();
        assert!(matches!(err, VersionError::MissingHeading));
    }

    #[test]
    fn non_version_heading_is_an_error() {
        let err = last_released_version("## Unreleased\n").unwrap_err();
        assert!(matches!(err, VersionError::UnparseablePatch { .. }));
    }

    #[test]
    fn reads_bundle_version_line() {
        let content = "Bundle-Name: Poshi Runner\nBundle-Version: 1.0.267\n";
        assert_eq!(bundle_version(content).unwrap(), "1.0.267");
    }

    #[test]
    fn bundle_version_trims_trailing_whitespace() {
        assert_eq!(bundle_version("Bundle-Version: 1.0.0 \r\n").unwrap(), "1.0.0");
    }

    #[test]
    fn missing_bundle_version_is_none() {
        assert_eq!(bundle_version("Bundle-Name: Poshi Runner\n"), None);
    }
}

//! config
//!
//! Run configuration.
//!
//! # Design
//!
//! The tool is single-purpose: one project layout, one tracker, one release
//! ticket. Everything here is a compiled-in default; the only runtime inputs
//! are the checkout directory, an optional release-ticket override, and the
//! tracker credentials supplied via environment variables.

use std::path::PathBuf;

use thiserror::Error;

/// Ticket that tracks the current release. All discovered tickets are linked
/// to it, and the run aborts if it has already been closed.
pub const DEFAULT_RELEASE_TICKET: &str = "POSHI-187";

/// Subdirectory of the checkout whose commits feed the release notes.
pub const MODULE_DIR: &str = "modules/test/poshi";

/// Build-metadata file whose `Bundle-Version` line carries the release version.
pub const BUILD_METADATA_PATH: &str = "modules/test/poshi/poshi-runner/bnd.bnd";

/// Changelog file rewritten at the end of the run.
pub const CHANGELOG_PATH: &str = "modules/test/poshi/CHANGELOG.markdown";

/// Base URL of the issue tracker.
pub const TRACKER_BASE_URL: &str = "https://issues.example.org";

/// How many build-metadata commits to scan for the previous release.
pub const METADATA_SCAN_WINDOW: usize = 50;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("environment variable not set: {0}")]
    MissingEnvVar(&'static str),
}

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the Git checkout.
    pub repo_dir: PathBuf,
    /// Path of the scanned subdirectory, relative to the checkout root.
    pub module_dir: String,
    /// Path of the build-metadata file, relative to the checkout root.
    pub metadata_path: String,
    /// Path of the changelog file, relative to the checkout root.
    pub changelog_path: String,
    /// Base URL of the issue tracker.
    pub tracker_base: String,
    /// The release-tracking ticket.
    pub release_ticket: String,
    /// Maximum number of build-metadata commits to scan.
    pub metadata_scan_window: usize,
}

impl Config {
    /// Build the default configuration for a checkout directory.
    pub fn new(repo_dir: PathBuf) -> Self {
        Self {
            repo_dir,
            module_dir: MODULE_DIR.to_string(),
            metadata_path: BUILD_METADATA_PATH.to_string(),
            changelog_path: CHANGELOG_PATH.to_string(),
            tracker_base: TRACKER_BASE_URL.to_string(),
            release_ticket: DEFAULT_RELEASE_TICKET.to_string(),
            metadata_scan_window: METADATA_SCAN_WINDOW,
        }
    }

    /// Absolute path of the changelog file.
    pub fn changelog_file(&self) -> PathBuf {
        self.repo_dir.join(&self.changelog_path)
    }

    /// Web URL for viewing a ticket.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.tracker_base, key)
    }

    /// Search URL listing all given tickets, as a `key in (...)` JQL query.
    ///
    /// Printed as a diagnostic so the keys can be reviewed in the tracker UI.
    pub fn issue_search_url(&self, keys: &[&str]) -> String {
        let base = format!("{}/issues/", self.tracker_base);
        let jql = format!("key in ({})", keys.join(", "));

        match reqwest::Url::parse_with_params(&base, &[("jql", jql.as_str())]) {
            Ok(url) => url.to_string(),
            Err(_) => base,
        }
    }
}

/// Basic-auth credentials for the issue tracker.
#[derive(Clone)]
pub struct Credentials {
    /// Tracker account name.
    pub username: String,
    /// Tracker account password or API token.
    pub password: String,
}

// Custom Debug to avoid exposing the password.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from `JIRA_USERNAME` and `JIRA_PASSWORD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = std::env::var("JIRA_USERNAME")
            .map_err(|_| ConfigError::MissingEnvVar("JIRA_USERNAME"))?;
        let password = std::env::var("JIRA_PASSWORD")
            .map_err(|_| ConfigError::MissingEnvVar("JIRA_PASSWORD"))?;

        Ok(Self { username, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(PathBuf::from("/tmp/checkout"))
    }

    #[test]
    fn browse_url_points_at_ticket() {
        assert_eq!(
            config().browse_url("POSHI-187"),
            "https://issues.example.org/browse/POSHI-187"
        );
    }

    #[test]
    fn changelog_file_is_under_repo_dir() {
        assert_eq!(
            config().changelog_file(),
            PathBuf::from("/tmp/checkout/modules/test/poshi/CHANGELOG.markdown")
        );
    }

    #[test]
    fn issue_search_url_encodes_jql() {
        let url = config().issue_search_url(&["LPS-1", "POSHI-2"]);
        assert!(url.starts_with("https://issues.example.org/issues/?jql="));
        assert!(url.contains("key"));
        assert!(url.contains("LPS-1"));
        assert!(url.contains("POSHI-2"));
        // Spaces must not survive unencoded.
        assert!(!url.contains(' '));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials {
            username: "user".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}

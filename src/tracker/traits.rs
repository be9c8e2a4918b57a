//! tracker::traits
//!
//! Tracker trait definition for interacting with the issue tracker.
//!
//! # Design
//!
//! The `Tracker` trait is async because tracker operations involve network
//! I/O, but callers await each call before issuing the next: the run is
//! strictly sequential, with no batching and no retries. Any tracker failure
//! is fatal to the run.

use async_trait::async_trait;
use thiserror::Error;

/// Name of the link type relating a release ticket to a shipped ticket.
pub const RELATIONSHIP_LINK_TYPE: &str = "Relationship";

/// Issue status that blocks a release run.
pub const CLOSED_STATUS: &str = "Closed";

/// Errors from tracker operations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// Authentication failed (bad credentials, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested issue was not found.
    #[error("issue not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Issue metadata fetched from the tracker.
///
/// Only the attributes the release-notes run consumes are modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Ticket identifier, e.g. `POSHI-123`
    pub key: String,
    /// One-line issue summary
    pub summary: String,
    /// Status display name, e.g. `Open` or `Closed`
    pub status: String,
    /// Labels, in tracker order
    pub labels: Vec<String>,
    /// Component display names, in tracker order
    pub components: Vec<String>,
}

impl Issue {
    /// Whether the issue's status is the closed status.
    pub fn is_closed(&self) -> bool {
        self.status == CLOSED_STATUS
    }
}

/// The Tracker trait for interacting with the issue tracker.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a `&dyn Tracker` can cross await
/// points.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Get the tracker name (e.g., "jira").
    fn name(&self) -> &'static str;

    /// Fetch an issue by key.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the issue doesn't exist
    /// - `AuthFailed` if credentials are rejected
    /// - `NetworkError` / `ApiError` for transport and server failures
    async fn get_issue(&self, key: &str) -> Result<Issue, TrackerError>;

    /// Create a link of `link_type` from `inward_key` to `outward_key`.
    ///
    /// Linking is not idempotent on the tracker side: calling this twice for
    /// the same pair creates two links.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either issue doesn't exist
    /// - `ApiError` if the link type is unknown or the request is rejected
    async fn link_issues(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> Result<(), TrackerError>;
}

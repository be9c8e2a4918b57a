//! tracker::mock
//!
//! Mock tracker implementation for deterministic testing.
//!
//! # Design
//!
//! The mock tracker stores issues in memory, records every operation for
//! later verification, and allows configuring failure scenarios so error
//! paths can be exercised without a network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{Issue, Tracker, TrackerError};

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    inner: Arc<Mutex<MockTrackerInner>>,
}

#[derive(Debug, Default)]
struct MockTrackerInner {
    /// Stored issues by key.
    issues: HashMap<String, Issue>,
    /// Keys fetched, in call order.
    fetched: Vec<String>,
    /// Links created, in call order.
    links: Vec<RecordedLink>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `get_issue` with the given error.
    GetIssue(TrackerError),
    /// Fail `link_issues` with the given error.
    LinkIssues(TrackerError),
}

/// A link recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLink {
    /// The link type name
    pub link_type: String,
    /// The inward issue key
    pub inward: String,
    /// The outward issue key
    pub outward: String,
}

impl MockTracker {
    /// Create an empty mock tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an issue, keyed by its `key` field.
    pub fn insert_issue(&self, issue: Issue) {
        let mut inner = self.inner.lock().unwrap();
        inner.issues.insert(issue.key.clone(), issue);
    }

    /// Configure an operation to fail.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail_on);
    }

    /// Keys fetched so far, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.inner.lock().unwrap().fetched.clone()
    }

    /// Links created so far, in call order.
    pub fn links(&self) -> Vec<RecordedLink> {
        self.inner.lock().unwrap().links.clone()
    }
}

#[async_trait]
impl Tracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_issue(&self, key: &str) -> Result<Issue, TrackerError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetched.push(key.to_string());

        if let Some(FailOn::GetIssue(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner
            .issues
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(key.to_string()))
    }

    async fn link_issues(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> Result<(), TrackerError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(FailOn::LinkIssues(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner.links.push(RecordedLink {
            link_type: link_type.to_string(),
            inward: inward_key.to_string(),
            outward: outward_key.to_string(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(key: &str) -> Issue {
        Issue {
            key: key.to_string(),
            summary: format!("summary of {}", key),
            status: "Open".to_string(),
            labels: vec![],
            components: vec![],
        }
    }

    #[tokio::test]
    async fn returns_inserted_issue() {
        let tracker = MockTracker::new();
        tracker.insert_issue(issue("POSHI-1"));

        let fetched = tracker.get_issue("POSHI-1").await.unwrap();
        assert_eq!(fetched.summary, "summary of POSHI-1");
        assert_eq!(tracker.fetched(), vec!["POSHI-1".to_string()]);
    }

    #[tokio::test]
    async fn unknown_issue_is_not_found() {
        let tracker = MockTracker::new();
        let err = tracker.get_issue("POSHI-404").await.unwrap_err();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[tokio::test]
    async fn records_links_in_order() {
        let tracker = MockTracker::new();
        tracker
            .link_issues("Relationship", "POSHI-187", "LRQA-100")
            .await
            .unwrap();
        tracker
            .link_issues("Relationship", "POSHI-187", "POSHI-300")
            .await
            .unwrap();

        let links = tracker.links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].outward, "LRQA-100");
        assert_eq!(links[1].outward, "POSHI-300");
    }

    #[tokio::test]
    async fn fail_on_link_issues() {
        let tracker = MockTracker::new();
        tracker.set_fail_on(FailOn::LinkIssues(TrackerError::ApiError {
            status: 400,
            message: "bad link type".to_string(),
        }));

        let err = tracker
            .link_issues("Bogus", "A-1", "B-2")
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::ApiError { .. }));
        assert!(tracker.links().is_empty());
    }
}

//! tracker::jira
//!
//! Jira implementation of the `Tracker` trait using the REST v2 API.
//!
//! # Design
//!
//! Two endpoints are used:
//!
//! - `GET /rest/api/2/issue/{key}` for issue metadata
//! - `POST /rest/api/2/issueLink` for "relates to" links
//!
//! Every request carries HTTP basic authentication. There is no retry logic;
//! the first failure of any kind is returned to the caller, which aborts the
//! run.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::{Issue, Tracker, TrackerError};
use crate::config::Credentials;

/// Jira tracker client.
pub struct JiraTracker {
    /// HTTP client for making requests
    client: Client,
    /// Base URL of the Jira instance (no trailing slash)
    base_url: String,
    /// Basic-auth credentials
    credentials: Credentials,
}

// Custom Debug to avoid exposing credentials.
impl std::fmt::Debug for JiraTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraTracker")
            .field("base_url", &self.base_url)
            .field("username", &self.credentials.username)
            .finish()
    }
}

impl JiraTracker {
    /// Create a new Jira tracker client.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Build URL for a REST v2 endpoint.
    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url, path)
    }

    /// Map an error response to a `TrackerError`.
    ///
    /// `context` names the resource for `NotFound` errors.
    async fn error_from_response(
        response: Response,
        status: StatusCode,
        context: &str,
    ) -> TrackerError {
        let message = match response.json::<JiraErrorResponse>().await {
            Ok(body) if !body.error_messages.is_empty() => body.error_messages.join("; "),
            _ => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TrackerError::AuthFailed(message),
            StatusCode::NOT_FOUND => TrackerError::NotFound(context.to_string()),
            _ => TrackerError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl Tracker for JiraTracker {
    fn name(&self) -> &'static str {
        "jira"
    }

    async fn get_issue(&self, key: &str) -> Result<Issue, TrackerError> {
        let url = self.api_url(&format!("issue/{}", key));

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(response, status, key).await);
        }

        let issue: JiraIssue = response.json().await.map_err(|e| TrackerError::ApiError {
            status: status.as_u16(),
            message: format!("failed to parse issue response: {}", e),
        })?;

        Ok(issue.into())
    }

    async fn link_issues(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
    ) -> Result<(), TrackerError> {
        let url = self.api_url("issueLink");

        let body = LinkIssuesBody {
            link_type: NamedType { name: link_type },
            inward_issue: IssueRef { key: inward_key },
            outward_issue: IssueRef { key: outward_key },
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let context = format!("{} -> {}", inward_key, outward_key);
            return Err(Self::error_from_response(response, status, &context).await);
        }

        Ok(())
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// Issue payload returned by `GET /rest/api/2/issue/{key}`.
#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraFields,
}

#[derive(Debug, Deserialize)]
struct JiraFields {
    summary: Option<String>,
    status: JiraStatus,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    components: Vec<JiraComponent>,
}

#[derive(Debug, Deserialize)]
struct JiraStatus {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JiraComponent {
    name: String,
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        Issue {
            key: issue.key,
            summary: issue.fields.summary.unwrap_or_default(),
            status: issue.fields.status.name,
            labels: issue.fields.labels,
            components: issue
                .fields
                .components
                .into_iter()
                .map(|component| component.name)
                .collect(),
        }
    }
}

/// Request body for `POST /rest/api/2/issueLink`.
#[derive(Debug, Serialize)]
struct LinkIssuesBody<'a> {
    #[serde(rename = "type")]
    link_type: NamedType<'a>,
    #[serde(rename = "inwardIssue")]
    inward_issue: IssueRef<'a>,
    #[serde(rename = "outwardIssue")]
    outward_issue: IssueRef<'a>,
}

#[derive(Debug, Serialize)]
struct NamedType<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct IssueRef<'a> {
    key: &'a str,
}

/// Error payload returned by Jira.
#[derive(Debug, Deserialize)]
struct JiraErrorResponse {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_base_and_path() {
        let tracker = JiraTracker::new(
            "https://issues.example.org",
            Credentials {
                username: "user".to_string(),
                password: "pass".to_string(),
            },
        );
        assert_eq!(
            tracker.api_url("issue/POSHI-187"),
            "https://issues.example.org/rest/api/2/issue/POSHI-187"
        );
    }

    #[test]
    fn issue_conversion_flattens_fields() {
        let wire = JiraIssue {
            key: "LRQA-100".to_string(),
            fields: JiraFields {
                summary: Some("Fix waits".to_string()),
                status: JiraStatus {
                    name: "Open".to_string(),
                },
                labels: vec!["poshi_api".to_string()],
                components: vec![JiraComponent {
                    name: "Runner".to_string(),
                }],
            },
        };

        let issue: Issue = wire.into();
        assert_eq!(issue.key, "LRQA-100");
        assert_eq!(issue.summary, "Fix waits");
        assert_eq!(issue.status, "Open");
        assert_eq!(issue.labels, vec!["poshi_api".to_string()]);
        assert_eq!(issue.components, vec!["Runner".to_string()]);
    }

    #[test]
    fn link_body_serializes_to_jira_shape() {
        let body = LinkIssuesBody {
            link_type: NamedType {
                name: "Relationship",
            },
            inward_issue: IssueRef { key: "POSHI-187" },
            outward_issue: IssueRef { key: "LRQA-100" },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": { "name": "Relationship" },
                "inwardIssue": { "key": "POSHI-187" },
                "outwardIssue": { "key": "LRQA-100" },
            })
        );
    }
}

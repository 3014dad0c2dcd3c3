use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::reply::{Responder, ReplyFacts};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API rejected the comment ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

/// GitHub REST client that posts the acknowledgement comment.
///
/// The token is passed only to `bearer_auth()`; it is never logged or
/// included in error messages.
pub struct GitHubResponder {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubResponder {
    pub fn new(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    /// Build a responder from loaded configuration. Fails if no token is
    /// available, before any request is attempted.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let token = config.github_token().ok_or(TransportError::MissingToken)?;
        Ok(Self::new(token, config.github_api_url()))
    }

    fn comment_url(&self, facts: &ReplyFacts) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, facts.owner, facts.repo, facts.issue_number
        )
    }
}

#[async_trait]
impl Responder for GitHubResponder {
    #[instrument(skip(self, body), fields(owner = %facts.owner, repo = %facts.repo, issue = facts.issue_number))]
    async fn post_comment(&self, facts: &ReplyFacts, body: &str) -> Result<(), TransportError> {
        let url = self.comment_url(facts);
        debug!("creating issue comment");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "smoke-responder")
            .bearer_auth(&self.token)
            .json(&json!({ "body": body }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        debug!(status = %status, "comment created");
        Ok(())
    }
}

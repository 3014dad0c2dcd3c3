use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::github::TransportError;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("payload does not identify the repository owner")]
    MissingOwner,

    #[error("payload does not identify the repository name")]
    MissingRepo,

    #[error("payload does not carry an issue number")]
    MissingIssueNumber,

    #[error("payload does not carry the triggering comment id")]
    MissingCommentId,
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Everything needed to address the acknowledgement comment, derived from the
/// event payload before any network call is made.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyFacts {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub comment_id: u64,
}

impl ReplyFacts {
    /// Derive the reply destination from a decoded event payload.
    ///
    /// Owner and repo each have a two-step fallback chain: the explicit
    /// nested field wins, otherwise the combined `repository.full_name`
    /// is split on `/`. All four facts must resolve or this fails.
    pub fn from_payload(payload: &Value) -> Result<Self, ResolutionError> {
        let full_name = payload
            .pointer("/repository/full_name")
            .and_then(Value::as_str)
            .and_then(|name| name.split_once('/'));

        let owner = payload
            .pointer("/repository/owner/login")
            .and_then(Value::as_str)
            .or(full_name.map(|(owner, _)| owner))
            .ok_or(ResolutionError::MissingOwner)?;

        let repo = payload
            .pointer("/repository/name")
            .and_then(Value::as_str)
            .or(full_name.map(|(_, repo)| repo))
            .ok_or(ResolutionError::MissingRepo)?;

        let issue_number = payload
            .pointer("/issue/number")
            .and_then(Value::as_u64)
            .ok_or(ResolutionError::MissingIssueNumber)?;

        let comment_id = payload
            .pointer("/comment/id")
            .and_then(Value::as_u64)
            .ok_or(ResolutionError::MissingCommentId)?;

        Ok(ReplyFacts {
            owner: owner.to_string(),
            repo: repo.to_string(),
            issue_number,
            comment_id,
        })
    }
}

/// The free-text comment body the trigger matcher scans, or "" if the
/// payload carries none.
pub fn comment_body(payload: &Value) -> &str {
    payload
        .pointer("/comment/body")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Fixed-format acknowledgement body.
pub fn compose_body(facts: &ReplyFacts) -> String {
    format!(
        "smoke ok\nrepo: {}/{}\nissue: {}\ncomment: {}",
        facts.owner, facts.repo, facts.issue_number, facts.comment_id
    )
}

/// Boundary collaborator that delivers the acknowledgement comment.
/// The GitHub client implements this; tests substitute their own.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn post_comment(&self, facts: &ReplyFacts, body: &str) -> Result<(), TransportError>;
}

/// Derive the reply facts, compose the acknowledgement, and hand it to the
/// responder. Resolution happens first; a payload that cannot name its
/// destination never reaches the network.
pub async fn respond(
    payload: &Value,
    responder: &dyn Responder,
) -> Result<ReplyFacts, ReplyError> {
    let facts = ReplyFacts::from_payload(payload)?;
    let body = compose_body(&facts);
    debug!(owner = %facts.owner, repo = %facts.repo, issue = facts.issue_number, "posting acknowledgement");
    responder.post_comment(&facts, &body).await?;
    Ok(facts)
}

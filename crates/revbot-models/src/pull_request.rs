use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::PullRequestStatus;

/// Number of reviewers a pull request should get.
pub const MAX_REVIEWERS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    /// Assigned reviewers, in assignment order.
    pub reviewers: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub merged_at: Option<OffsetDateTime>,
}

impl Default for PullRequest {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            author_id: String::new(),
            status: PullRequestStatus::Open,
            reviewers: Vec::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            merged_at: None,
        }
    }
}

impl PullRequest {
    /// Build a new open pull request.
    pub fn new(id: &str, name: &str, author_id: &str, created_at: OffsetDateTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author_id: author_id.into(),
            created_at,
            ..Default::default()
        }
    }

    pub fn with_reviewers(mut self, reviewers: Vec<String>) -> Self {
        self.reviewers = reviewers;
        self
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Derived from the reviewer count, never stored.
    pub fn need_more_reviewers(&self) -> bool {
        self.reviewers.len() < MAX_REVIEWERS
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r == user_id)
    }

    pub fn to_short(&self) -> PullRequestShort {
        PullRequestShort {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Pull request summary, without reviewers nor timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestShort {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

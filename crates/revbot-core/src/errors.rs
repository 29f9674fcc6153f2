//! Engine errors.

use revbot_database_interface::DatabaseError;
use thiserror::Error;

/// Coarse error classification, for callers mapping failures to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    AlreadyMerged,
    NoCandidate,
    InvalidInput,
    Internal,
}

/// Engine error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown user '{user_id}'")]
    UnknownUser { user_id: String },

    #[error("Unknown team '{team_name}'")]
    UnknownTeam { team_name: String },

    #[error("Unknown pull request '{pull_request_id}'")]
    UnknownPullRequest { pull_request_id: String },

    #[error("User '{user_id}' is not assigned to pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    #[error("Pull request '{pull_request_id}' already exists")]
    PullRequestAlreadyExists { pull_request_id: String },

    #[error("Team '{team_name}' already exists")]
    TeamAlreadyExists { team_name: String },

    #[error("User '{user_id}' is already assigned to pull request '{pull_request_id}'")]
    ReviewerAlreadyAssigned {
        pull_request_id: String,
        user_id: String,
    },

    #[error("Pull request '{pull_request_id}' is merged")]
    PullRequestMerged { pull_request_id: String },

    #[error("No active replacement candidate for '{user_id}' on pull request '{pull_request_id}'")]
    NoCandidate {
        pull_request_id: String,
        user_id: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Wraps [`revbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownUser { .. }
            | Self::UnknownTeam { .. }
            | Self::UnknownPullRequest { .. }
            | Self::ReviewerNotAssigned { .. } => ErrorKind::NotFound,
            Self::PullRequestAlreadyExists { .. }
            | Self::TeamAlreadyExists { .. }
            | Self::ReviewerAlreadyAssigned { .. } => ErrorKind::AlreadyExists,
            Self::PullRequestMerged { .. } => ErrorKind::AlreadyMerged,
            Self::NoCandidate { .. } => ErrorKind::NoCandidate,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::DatabaseError { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::UnknownUser(user_id) => Self::UnknownUser { user_id },
            DatabaseError::UnknownTeam(team_name) => Self::UnknownTeam { team_name },
            DatabaseError::UnknownPullRequest(pull_request_id) => {
                Self::UnknownPullRequest { pull_request_id }
            }
            DatabaseError::UnknownReviewer(pull_request_id, user_id) => {
                Self::ReviewerNotAssigned {
                    pull_request_id,
                    user_id,
                }
            }
            DatabaseError::PullRequestAlreadyExists(pull_request_id) => {
                Self::PullRequestAlreadyExists { pull_request_id }
            }
            DatabaseError::TeamAlreadyExists(team_name) => Self::TeamAlreadyExists { team_name },
            DatabaseError::PullRequestAlreadyMerged(pull_request_id) => {
                Self::PullRequestMerged { pull_request_id }
            }
            DatabaseError::ReviewerAlreadyAssigned(pull_request_id, user_id) => {
                Self::ReviewerAlreadyAssigned {
                    pull_request_id,
                    user_id,
                }
            }
            e @ DatabaseError::InvalidReviewerSet(..) => Self::invalid_input(e.to_string()),
            source @ DatabaseError::ImplementationError { .. } => Self::DatabaseError { source },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn storage_outcomes_are_classified() {
        let kind = |e: DatabaseError| DomainError::from(e).kind();

        assert_eq!(kind(DatabaseError::UnknownUser("u1".into())), ErrorKind::NotFound);
        assert_eq!(
            kind(DatabaseError::UnknownReviewer("pr-1".into(), "u1".into())),
            ErrorKind::NotFound
        );
        assert_eq!(
            kind(DatabaseError::PullRequestAlreadyExists("pr-1".into())),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            kind(DatabaseError::TeamAlreadyExists("backend".into())),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            kind(DatabaseError::PullRequestAlreadyMerged("pr-1".into())),
            ErrorKind::AlreadyMerged
        );
        assert_eq!(
            kind(DatabaseError::ImplementationError {
                source: "connection reset".into()
            }),
            ErrorKind::Internal
        );
    }

    #[test]
    fn invalid_reviewer_set_is_invalid_input() {
        let e = DomainError::from(DatabaseError::InvalidReviewerSet(
            "pr-1".into(),
            "author cannot review".into(),
        ));

        assert_eq!(e.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            e.to_string(),
            "Invalid input: Invalid reviewer set for pull request 'pr-1': author cannot review"
        );
    }

    #[test]
    fn storage_message_is_kept() {
        let e = DomainError::from(DatabaseError::ImplementationError {
            source: "connection reset".into(),
        });

        assert_eq!(e.to_string(), "Database error: connection reset");
    }
}

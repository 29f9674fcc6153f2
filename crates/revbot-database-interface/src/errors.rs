use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("User '{1}' is not a reviewer of pull request '{0}'")]
    UnknownReviewer(String, String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Pull request '{0}' is already merged")]
    PullRequestAlreadyMerged(String),

    #[error("User '{1}' is already a reviewer of pull request '{0}'")]
    ReviewerAlreadyAssigned(String, String),

    #[error("Invalid reviewer set for pull request '{0}': {1}")]
    InvalidReviewerSet(String, String),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;

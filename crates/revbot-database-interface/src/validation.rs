use revbot_models::{PullRequest, MAX_REVIEWERS};

use crate::{DatabaseError, Result};

/// Reject reviewer sets a pull request must never hold.
pub fn validate_reviewer_set(instance: &PullRequest) -> Result<()> {
    if instance.reviewers.len() > MAX_REVIEWERS {
        return Err(DatabaseError::InvalidReviewerSet(
            instance.id.clone(),
            format!("more than {MAX_REVIEWERS} reviewers"),
        ));
    }

    if instance.has_reviewer(&instance.author_id) {
        return Err(author_as_reviewer(&instance.id));
    }

    Ok(())
}

pub fn author_as_reviewer(pull_request_id: &str) -> DatabaseError {
    DatabaseError::InvalidReviewerSet(pull_request_id.into(), "author cannot review".into())
}

use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};
use tracing::info;

use crate::{
    use_cases::{ensure_not_empty, reviews::ReviewerChooser},
    CoreContext, DomainError, Result,
};

/// Reassignment outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignedPullRequest {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignPullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedPullRequest>;
}

#[derive(Component)]
#[shaku(interface = ReassignPullRequestInterface)]
pub(crate) struct ReassignPullRequest;

#[async_trait]
impl ReassignPullRequestInterface for ReassignPullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<ReassignedPullRequest> {
        ensure_not_empty("pull_request_id", pull_request_id)?;
        ensure_not_empty("old_reviewer_id", old_reviewer_id)?;

        let pr = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        if pr.is_merged() {
            return Err(DomainError::PullRequestMerged {
                pull_request_id: pull_request_id.into(),
            });
        }

        if !pr.has_reviewer(old_reviewer_id) {
            return Err(DomainError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                user_id: old_reviewer_id.into(),
            });
        }

        let departing = ctx.db_service.users_get_expect(old_reviewer_id).await?;
        let active_ids = match &departing.team_name {
            Some(team_name) => {
                ctx.db_service
                    .users_list_active_ids_by_team(team_name)
                    .await?
            }
            None => vec![],
        };

        let replaced_by = ReviewerChooser::default()
            .choose_replacement(&pr, old_reviewer_id, &active_ids)
            .ok_or_else(|| DomainError::NoCandidate {
                pull_request_id: pull_request_id.into(),
                user_id: old_reviewer_id.into(),
            })?;

        info!(
            pull_request_id = pull_request_id,
            old_reviewer_id = old_reviewer_id,
            new_reviewer_id = %replaced_by,
            message = "Replacing reviewer"
        );

        // The store re-checks status and assignment under a row lock.
        let pull_request = ctx
            .db_service
            .pull_request_reviewers_replace(pull_request_id, old_reviewer_id, &replaced_by)
            .await?;

        Ok(ReassignedPullRequest {
            pull_request,
            replaced_by,
        })
    }
}

use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{
    use_cases::{ensure_not_empty, reviews::ReviewerChooser},
    CoreContext, DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        author_id: &str,
        pull_request_id: &str,
        name: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        author_id: &str,
        pull_request_id: &str,
        name: &str,
    ) -> Result<PullRequest> {
        ensure_not_empty("author_id", author_id)?;
        ensure_not_empty("pull_request_id", pull_request_id)?;
        ensure_not_empty("name", name)?;

        let author = ctx.db_service.users_get_expect(author_id).await?;
        let active_ids = match &author.team_name {
            Some(team_name) => {
                ctx.db_service
                    .users_list_active_ids_by_team(team_name)
                    .await?
            }
            None => vec![],
        };

        let reviewers = ReviewerChooser::default().choose_initial(author_id, &active_ids);
        info!(
            pull_request_id = pull_request_id,
            reviewers = ?reviewers,
            message = "Assigning reviewers"
        );

        // Uniqueness is enforced by the store, there is no pre-check.
        ctx.db_service
            .pull_requests_create(
                PullRequest::new(pull_request_id, name, author_id, OffsetDateTime::now_utc())
                    .with_reviewers(reviewers),
            )
            .await
            .map_err(DomainError::from)
    }
}

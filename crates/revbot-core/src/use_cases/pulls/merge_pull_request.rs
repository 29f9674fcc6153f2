use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::debug;

use crate::{use_cases::ensure_not_empty, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        ensure_not_empty("pull_request_id", pull_request_id)?;

        let pr = ctx
            .db_service
            .pull_requests_get_expect(pull_request_id)
            .await?;

        if pr.is_merged() {
            debug!(
                pull_request_id = pull_request_id,
                message = "Pull request already merged"
            );
            return Ok(pr);
        }

        ctx.db_service
            .pull_requests_merge(pull_request_id, OffsetDateTime::now_utc())
            .await
            .map_err(DomainError::from)
    }
}

use async_trait::async_trait;
use revbot_models::PullRequestShort;
use shaku::{Component, Interface};

use crate::{use_cases::ensure_not_empty, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListAssignedPullRequestsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str)
        -> Result<Vec<PullRequestShort>>;
}

#[derive(Component)]
#[shaku(interface = ListAssignedPullRequestsInterface)]
pub(crate) struct ListAssignedPullRequests;

#[async_trait]
impl ListAssignedPullRequestsInterface for ListAssignedPullRequests {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        ensure_not_empty("user_id", user_id)?;

        ctx.db_service
            .pull_requests_list_by_reviewer(user_id)
            .await
            .map_err(DomainError::from)
    }
}

use async_trait::async_trait;
use revbot_models::ReviewerStats;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetReviewerLoadInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Vec<ReviewerStats>>;
}

#[derive(Component)]
#[shaku(interface = GetReviewerLoadInterface)]
pub(crate) struct GetReviewerLoad;

#[async_trait]
impl GetReviewerLoadInterface for GetReviewerLoad {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<Vec<ReviewerStats>> {
        ctx.db_service
            .stats_reviewer_load()
            .await
            .map_err(DomainError::from)
    }
}

use async_trait::async_trait;
use revbot_models::Team;
use shaku::{Component, Interface};

use crate::{use_cases::ensure_not_empty, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = GetTeamInterface)]
pub(crate) struct GetTeam;

#[async_trait]
impl GetTeamInterface for GetTeam {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team> {
        ensure_not_empty("team_name", team_name)?;

        ctx.db_service
            .teams_get_expect(team_name)
            .await
            .map_err(DomainError::from)
    }
}

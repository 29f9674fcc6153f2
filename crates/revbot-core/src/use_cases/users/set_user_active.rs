use async_trait::async_trait;
use revbot_models::User;
use shaku::{Component, Interface};

use crate::{use_cases::ensure_not_empty, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SetUserActiveInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str, is_active: bool)
        -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = SetUserActiveInterface)]
pub(crate) struct SetUserActive;

#[async_trait]
impl SetUserActiveInterface for SetUserActive {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
        is_active: bool,
    ) -> Result<User> {
        ensure_not_empty("user_id", user_id)?;

        ctx.db_service
            .users_set_active(user_id, is_active)
            .await
            .map_err(DomainError::from)
    }
}

use std::collections::HashSet;

use async_trait::async_trait;
use revbot_models::Team;
use shaku::{Component, Interface};

use crate::{use_cases::ensure_not_empty, CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = CreateTeamInterface)]
pub(crate) struct CreateTeam;

impl CreateTeam {
    fn validate(team: &Team) -> Result<()> {
        ensure_not_empty("team_name", &team.name)?;

        let mut seen = HashSet::new();
        for member in &team.members {
            ensure_not_empty("user_id", &member.user_id)?;
            if !seen.insert(member.user_id.as_str()) {
                return Err(DomainError::invalid_input(format!(
                    "user '{}' is listed twice",
                    member.user_id
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CreateTeamInterface for CreateTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team> {
        Self::validate(&team)?;

        // Two separate steps: a failure while adding members leaves a partial roster.
        ctx.db_service.teams_create(&team.name).await?;
        for member in &team.members {
            ctx.db_service
                .users_create_or_update(member.to_user(&team.name))
                .await?;
        }

        ctx.db_service
            .teams_get_expect(&team.name)
            .await
            .map_err(DomainError::from)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;
    use revbot_models::{TeamMember, User};

    use super::*;
    use crate::{context::tests::CoreContextTest, ErrorKind};

    fn member(user_id: &str, is_active: bool) -> TeamMember {
        TeamMember {
            user_id: user_id.into(),
            username: user_id.to_uppercase(),
            is_active,
        }
    }

    #[tokio::test]
    async fn create_with_members() {
        let ctx = CoreContextTest::new();
        let team = Team {
            name: "backend".into(),
            members: vec![member("u2", true), member("u1", false)],
        };

        let created = CreateTeam
            .run(&ctx.as_context(), team.clone())
            .await
            .unwrap();

        assert_eq!(created, team);
        assert_eq!(
            ctx.db_service.users_get("u1").await.unwrap(),
            Some(User {
                id: "u1".into(),
                username: "U1".into(),
                team_name: Some("backend".into()),
                is_active: false
            })
        );
    }

    #[tokio::test]
    async fn members_move_between_teams() {
        let ctx = CoreContextTest::new()
            .with_team("backend", &[("u1", true), ("u2", true)])
            .await;

        CreateTeam
            .run(
                &ctx.as_context(),
                Team {
                    name: "frontend".into(),
                    members: vec![member("u2", true)],
                },
            )
            .await
            .unwrap();

        assert_eq!(
            ctx.db_service
                .users_list_active_ids_by_team("backend")
                .await
                .unwrap(),
            vec!["u1"]
        );
        assert_eq!(
            ctx.db_service
                .users_get_expect("u2")
                .await
                .unwrap()
                .team_name
                .as_deref(),
            Some("frontend")
        );
    }

    #[tokio::test]
    async fn duplicate_team() {
        let ctx = CoreContextTest::new().with_team("backend", &[]).await;

        let e = CreateTeam
            .run(
                &ctx.as_context(),
                Team {
                    name: "backend".into(),
                    members: vec![member("u1", true)],
                },
            )
            .await
            .unwrap_err();

        assert_eq!(e.kind(), ErrorKind::AlreadyExists);
        assert_eq!(ctx.db_service.users_get("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_teams() {
        let ctx = CoreContextTest::new();

        for team in [
            Team {
                name: "".into(),
                members: vec![],
            },
            Team {
                name: "backend".into(),
                members: vec![member("", true)],
            },
            Team {
                name: "backend".into(),
                members: vec![member("u1", true), member("u1", false)],
            },
        ] {
            let e = CreateTeam
                .run(&ctx.as_context(), team)
                .await
                .unwrap_err();
            assert_eq!(e.kind(), ErrorKind::InvalidInput);
        }

        assert_eq!(ctx.db_service.teams_get("backend").await.unwrap(), None);
    }
}

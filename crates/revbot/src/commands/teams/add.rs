use std::str::FromStr;

use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::teams::CreateTeamInterface;
use revbot_models::{Team, TeamMember};
use shaku::HasComponent;
use thiserror::Error;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

#[derive(Debug, Error)]
pub(crate) enum MemberArgError {
    #[error("Invalid member '{value}', expected 'id:username' or 'id:username:inactive'")]
    InvalidFormat { value: String },
}

/// Member given as `id:username[:inactive]`.
#[derive(Debug, Clone)]
pub(crate) struct MemberArg(TeamMember);

impl FromStr for MemberArg {
    type Err = MemberArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MemberArgError::InvalidFormat { value: s.into() };

        let mut parts = s.split(':');
        let user_id = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let username = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let is_active = match parts.next() {
            None => true,
            Some("inactive") => false,
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(TeamMember {
            user_id: user_id.into(),
            username: username.into(),
            is_active,
        }))
    }
}

/// Create a team and add its members
#[derive(Parser)]
pub(crate) struct TeamAddCommand {
    /// Team name
    name: String,

    /// Members, in directory order (e.g. 'u1:alice' or 'u2:bob:inactive')
    members: Vec<MemberArg>,
}

#[async_trait]
impl Command for TeamAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
        let team = create_team
            .run(
                &ctx.as_core_context(),
                Team {
                    name: self.name,
                    members: self.members.into_iter().map(|m| m.0).collect(),
                },
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' created with {} member(s).",
            team.name,
            team.members.len()
        )?;

        Ok(())
    }
}

use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::stats::GetReviewerLoadInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show review assignments per user
#[derive(Parser)]
pub(crate) struct StatsReviewerLoadCommand;

#[async_trait]
impl Command for StatsReviewerLoadCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_reviewer_load: &dyn GetReviewerLoadInterface = ctx.core_module.resolve_ref();
        let stats = get_reviewer_load.run(&ctx.as_core_context()).await?;

        let mut writer = ctx.writer.write().await;
        if stats.is_empty() {
            writeln!(writer, "No users.")?;
            return Ok(());
        }

        for entry in stats {
            writeln!(
                writer,
                "{} ({}, {}): {} assigned, {} open, {} merged",
                entry.user_id,
                entry.username,
                entry.team_name.as_deref().unwrap_or("no team"),
                entry.assigned_count,
                entry.open_count,
                entry.merged_count
            )?;
        }

        Ok(())
    }
}

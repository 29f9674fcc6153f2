use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::ListAssignedPullRequestsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests a user reviews
#[derive(Parser)]
pub(crate) struct UserReviewsCommand {
    /// User identifier
    user_id: String,
}

#[async_trait]
impl Command for UserReviewsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_assigned: &dyn ListAssignedPullRequestsInterface = ctx.core_module.resolve_ref();
        let pull_requests = list_assigned
            .run(&ctx.as_core_context(), &self.user_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        if pull_requests.is_empty() {
            writeln!(writer, "No pull request reviewed by '{}'.", self.user_id)?;
            return Ok(());
        }

        writeln!(writer, "Pull requests reviewed by '{}':", self.user_id)?;
        for pr in pull_requests {
            writeln!(
                writer,
                "  - {} '{}' by {} [{}]",
                pr.id, pr.name, pr.author_id, pr.status
            )?;
        }

        Ok(())
    }
}

use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::CreatePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Create a pull request and assign reviewers
#[derive(Parser)]
pub(crate) struct PullRequestCreateCommand {
    /// Pull request identifier
    pull_request_id: String,

    /// Pull request name
    name: String,

    /// Author identifier
    author_id: String,
}

#[async_trait]
impl Command for PullRequestCreateCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = create_pull_request
            .run(
                &ctx.as_core_context(),
                &self.author_id,
                &self.pull_request_id,
                &self.name,
            )
            .await?;

        let reviewers = if pr.reviewers.is_empty() {
            "none".to_string()
        } else {
            pr.reviewers.join(", ")
        };

        writeln!(
            ctx.writer.write().await,
            "Pull request '{}' created, reviewers: {}.",
            pr.id,
            reviewers
        )?;

        Ok(())
    }
}

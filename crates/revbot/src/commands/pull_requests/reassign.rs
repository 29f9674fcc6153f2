use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::ReassignPullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Replace a reviewer on a pull request
#[derive(Parser)]
pub(crate) struct PullRequestReassignCommand {
    /// Pull request identifier
    pull_request_id: String,

    /// Reviewer to replace
    old_reviewer_id: String,
}

#[async_trait]
impl Command for PullRequestReassignCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let reassign: &dyn ReassignPullRequestInterface = ctx.core_module.resolve_ref();
        let result = reassign
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.old_reviewer_id,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewer '{}' replaced by '{}' on pull request '{}'.",
            self.old_reviewer_id,
            result.replaced_by,
            result.pull_request.id
        )?;

        Ok(())
    }
}

use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::MergePullRequestInterface;
use shaku::HasComponent;
use time::format_description::well_known::Rfc3339;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Mark a pull request as merged
#[derive(Parser)]
pub(crate) struct PullRequestMergeCommand {
    /// Pull request identifier
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestMergeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let merge: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
        let pr = merge
            .run(&ctx.as_core_context(), &self.pull_request_id)
            .await?;

        let merged_at = match pr.merged_at {
            Some(merged_at) => merged_at.format(&Rfc3339)?,
            None => "-".into(),
        };

        writeln!(
            ctx.writer.write().await,
            "Pull request '{}' merged at {}.",
            pr.id,
            merged_at
        )?;

        Ok(())
    }
}

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod reviewer_load;

use self::reviewer_load::StatsReviewerLoadCommand;

/// Show statistics
#[derive(Parser)]
pub(crate) struct StatsCommand {
    #[clap(subcommand)]
    inner: StatsSubCommand,
}

#[async_trait]
impl Command for StatsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
pub(crate) enum StatsSubCommand {
    ReviewerLoad(StatsReviewerLoadCommand),
}

#[async_trait]
impl Command for StatsSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::ReviewerLoad(sub) => sub.execute(ctx).await,
        }
    }
}

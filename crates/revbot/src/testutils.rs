use std::{io::Write, sync::Arc};

use clap::Parser;
use revbot_config::Config;
use revbot_core::CoreModule;
use revbot_database_interface::{DatabaseError, DbService};
use revbot_database_memory::MemoryDb;
use revbot_models::{PullRequest, User};
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: Arc<MemoryDb>,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self::with_db(Arc::new(MemoryDb::new()))
    }

    /// Context sharing an existing database, to chain several commands.
    pub fn with_db(db_service: Arc<MemoryDb>) -> Self {
        Self {
            config: Config::from_env_no_version().unwrap(),
            core_module: CoreModule::builder().build(),
            db_service,
        }
    }

    /// Create a team whose members are active and named after their identifier.
    pub async fn with_team(self, team_name: &str, user_ids: &[&str]) -> Result<Self, DatabaseError> {
        self.db_service.teams_create(team_name).await?;
        for user_id in user_ids {
            self.db_service
                .users_create_or_update(User {
                    id: user_id.to_string(),
                    username: user_id.to_string(),
                    team_name: Some(team_name.into()),
                    is_active: true,
                })
                .await?;
        }

        Ok(self)
    }

    pub async fn with_pull_request(
        self,
        pull_request_id: &str,
        author_id: &str,
        reviewers: &[&str],
    ) -> Result<Self, DatabaseError> {
        self.db_service
            .pull_requests_create(
                PullRequest::new(
                    pull_request_id,
                    pull_request_id,
                    author_id,
                    OffsetDateTime::UNIX_EPOCH,
                )
                .with_reviewers(reviewers.iter().map(|r| r.to_string()).collect()),
            )
            .await?;

        Ok(self)
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: self.db_service,
            writer,
        }
    }
}

async fn run_command(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> (anyhow::Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["revbot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await,
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Run a command expected to fail and return the error message.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, _) = run_command(ctx, command_args).await;
    result.unwrap_err().to_string()
}

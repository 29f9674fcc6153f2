use std::sync::Arc;

use clap::Parser;
use revbot_config::{Config, DatabaseDriver};
use revbot_core::CoreModule;
use revbot_database_interface::DbService;
use revbot_database_memory::MemoryDb;
use revbot_database_pg::{establish_pool_connection, run_migrations, PostgresDb};
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let db_service: Arc<dyn DbService + Send + Sync + 'static> = {
                if config.database.driver == DatabaseDriver::Postgres {
                    info!("Using PostgresDb database driver");

                    let pool = establish_pool_connection(&config).await?;
                    run_migrations(&pool).await?;

                    Arc::new(PostgresDb::new(pool))
                } else {
                    info!("Using MemoryDb database driver");
                    Arc::new(MemoryDb::new())
                }
            };
            db_service.health_check().await?;

            let ctx = CommandContext {
                config,
                db_service,
                core_module,
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(sync(config, args))
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}

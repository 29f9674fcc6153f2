use futures::Future;
use revbot_config::Config;
use revbot_database_interface::DbService;
use revbot_database_memory::MemoryDb;
use revbot_database_pg::{PostgresDb, TestDatabase};
use tracing::info;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

fn configured_test_db(full_name: &str) -> Option<TestDatabase> {
    let config = Config::from_env_no_version().unwrap();
    TestDatabase::from_config(&config, full_name)
}

/// Returns `false` when no Postgres server is configured.
async fn run_pg<F, Fut>(full_name: &str, test_db: Option<TestDatabase>, block: &F) -> bool
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let Some(test_db) = test_db else {
        info!("BOT_DATABASE_PG_URL is not set, skipping postgres test {full_name}");
        return false;
    };

    let pool = test_db.create().await.unwrap();
    info!("running postgres test {full_name} ...");
    block(Box::new(PostgresDb::new(pool.clone()))).await.unwrap();

    test_db.destroy(pool).await.unwrap();
    true
}

/// Run the same block against the memory store, then Postgres when configured.
pub async fn db_test_case<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let full_name = format!("test-revbot-{test_name}");

    {
        // In memory
        let mem_db = Box::new(MemoryDb::new());
        info!("running memory test {full_name} ...");
        block(mem_db).await.unwrap();
    }

    run_pg(&full_name, configured_test_db(&full_name), &block).await;
}

/// Run the block against Postgres only; skipped when no server is configured.
pub async fn db_test_case_pg<F, Fut>(test_name: &str, block: F)
where
    F: Fn(Box<dyn DbService>) -> Fut,
    Fut: Future<Output = TestResult>,
{
    let full_name = format!("test-revbot-{test_name}");
    run_pg(&full_name, configured_test_db(&full_name), &block).await;
}

//! Throwaway databases for store tests.

use revbot_config::Config;
use revbot_database_interface::{DatabaseError, Result};
use sqlx::{postgres::PgPoolOptions, Connection, Executor, PgConnection};
use tracing::info;

use crate::{run_migrations, DbPool};

/// A scratch database living next to the one configured in `BOT_DATABASE_PG_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDatabase {
    server_url: String,
    name: String,
    pool_size: u32,
}

impl TestDatabase {
    /// Returns `None` when no server URL is configured.
    pub fn from_config(config: &Config, name: &str) -> Option<Self> {
        let url = config.database.pg.url.trim();
        if url.is_empty() {
            return None;
        }

        Some(Self {
            server_url: server_url(url),
            name: name.into(),
            pool_size: config.database.pg.pool_size.clamp(1, 2),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> String {
        format!("{}/{}", self.server_url, self.name)
    }

    fn maintenance_url(&self) -> String {
        format!("{}/postgres", self.server_url)
    }

    /// Recreate the database from scratch and run migrations on it.
    pub async fn create(&self) -> Result<DbPool> {
        info!(database = %self.name, message = "Creating test database");

        let mut conn = self.connect(&self.maintenance_url()).await?;
        self.drop_in(&mut conn).await?;
        conn.execute(format!(r#"CREATE DATABASE "{}""#, self.name).as_str())
            .await
            .map_err(wrap)?;

        let pool = PgPoolOptions::new()
            .max_connections(self.pool_size)
            .connect(&self.url())
            .await
            .map_err(wrap)?;
        run_migrations(&pool).await?;

        Ok(pool)
    }

    /// Close the pool and remove the database.
    pub async fn destroy(&self, pool: DbPool) -> Result<()> {
        pool.close().await;

        let mut conn = self.connect(&self.maintenance_url()).await?;
        self.drop_in(&mut conn).await
    }

    async fn connect(&self, url: &str) -> Result<PgConnection> {
        PgConnection::connect(url).await.map_err(wrap)
    }

    async fn drop_in(&self, conn: &mut PgConnection) -> Result<()> {
        sqlx::query(
            r#"
            SELECT pg_terminate_backend(pid)
            FROM pg_stat_activity
            WHERE datname = $1
            AND pid <> pg_backend_pid()
        "#,
        )
        .bind(&self.name)
        .execute(&mut *conn)
        .await
        .map_err(wrap)?;

        conn.execute(format!(r#"DROP DATABASE IF EXISTS "{}""#, self.name).as_str())
            .await
            .map_err(wrap)?;

        Ok(())
    }
}

/// Strip the database name from a connection URL.
fn server_url(url: &str) -> String {
    url.split('/').take(3).collect::<Vec<_>>().join("/")
}

fn wrap(e: sqlx::Error) -> DatabaseError {
    DatabaseError::ImplementationError { source: e.into() }
}

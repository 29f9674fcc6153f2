use async_trait::async_trait;
use revbot_database_interface::{
    author_as_reviewer, validate_reviewer_set, DatabaseError, DbService, Result,
};
use revbot_models::{PullRequest, PullRequestShort, PullRequestStatus, ReviewerStats, Team, User};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use tracing::warn;

use crate::row::{PullRequestRow, PullRequestShortRow, ReviewerStatsRow, UserRow};

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_implementation_error(e: sqlx::Error) -> DatabaseError {
        DatabaseError::ImplementationError { source: e.into() }
    }

    fn wrap_row_not_found(e: sqlx::Error, target: DatabaseError) -> DatabaseError {
        if let sqlx::Error::RowNotFound = e {
            target
        } else {
            Self::wrap_implementation_error(e)
        }
    }

    fn is_unique_violation(e: &sqlx::Error) -> bool {
        matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
    }

    fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
        matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(Self::wrap_implementation_error)
    }

    /// Transaction where every read sees the same snapshot.
    async fn begin_read_only(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(Self::wrap_implementation_error)?;

        Ok(tx)
    }

    /// Commit on success, roll back otherwise.
    ///
    /// A failed rollback is only logged: the caller gets the original error.
    async fn finish<T>(tx: Transaction<'static, Postgres>, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(Self::wrap_implementation_error)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!(
                        error = %rollback_error,
                        "Could not roll back transaction"
                    );
                }

                Err(e)
            }
        }
    }

    async fn fetch_pull_request(conn: &mut PgConnection, id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT pull_request.*,
                ARRAY(
                    SELECT reviewer_id
                    FROM pull_request_reviewer
                    WHERE pull_request_reviewer.pull_request_id = pull_request.pull_request_id
                    ORDER BY pull_request_reviewer.id
                )::TEXT[] AS reviewers
            FROM pull_request
            WHERE pull_request_id = $1
        "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    async fn fetch_pull_request_expect(conn: &mut PgConnection, id: &str) -> Result<PullRequest> {
        Self::fetch_pull_request(conn, id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }

    async fn insert_reviewer(conn: &mut PgConnection, id: &str, reviewer_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pull_request_reviewer
            (
                pull_request_id,
                reviewer_id
            )
            VALUES
            (
                $1,
                $2
            );
        "#,
        )
        .bind(id)
        .bind(reviewer_id)
        .execute(conn)
        .await
        .map_err(|e| {
            if Self::is_unique_violation(&e) {
                DatabaseError::ReviewerAlreadyAssigned(id.into(), reviewer_id.into())
            } else if Self::is_foreign_key_violation(&e) {
                DatabaseError::UnknownUser(reviewer_id.into())
            } else {
                Self::wrap_implementation_error(e)
            }
        })?;

        Ok(())
    }

    async fn create_pull_request_in(
        conn: &mut PgConnection,
        instance: PullRequest,
    ) -> Result<PullRequest> {
        validate_reviewer_set(&instance)?;

        sqlx::query(
            r#"
            INSERT INTO pull_request
            (
                pull_request_id,
                pull_request_name,
                author_id,
                status,
                created_at,
                merged_at
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4,
                $5,
                $6
            );
        "#,
        )
        .bind(&instance.id)
        .bind(&instance.name)
        .bind(&instance.author_id)
        .bind(instance.status.to_str())
        .bind(instance.created_at)
        .bind(instance.merged_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            if Self::is_unique_violation(&e) {
                DatabaseError::PullRequestAlreadyExists(instance.id.clone())
            } else if Self::is_foreign_key_violation(&e) {
                DatabaseError::UnknownUser(instance.author_id.clone())
            } else {
                Self::wrap_implementation_error(e)
            }
        })?;

        for reviewer_id in &instance.reviewers {
            Self::insert_reviewer(&mut *conn, &instance.id, reviewer_id).await?;
        }

        Self::fetch_pull_request_expect(conn, &instance.id).await
    }

    async fn merge_pull_request_in(
        conn: &mut PgConnection,
        id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest> {
        sqlx::query(
            r#"
            UPDATE pull_request
            SET status = $2,
            merged_at = COALESCE(merged_at, $3)
            WHERE pull_request_id = $1
            RETURNING pull_request_id
        "#,
        )
        .bind(id)
        .bind(PullRequestStatus::Merged.to_str())
        .bind(merged_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| Self::wrap_row_not_found(e, DatabaseError::UnknownPullRequest(id.into())))?;

        Self::fetch_pull_request_expect(conn, id).await
    }

    async fn replace_reviewer_in(
        conn: &mut PgConnection,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<PullRequest> {
        let (status, author_id): (String, String) = sqlx::query_as(
            r#"
            SELECT status, author_id
            FROM pull_request
            WHERE pull_request_id = $1
            FOR UPDATE
        "#,
        )
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| Self::wrap_row_not_found(e, DatabaseError::UnknownPullRequest(id.into())))?;

        if status == PullRequestStatus::Merged.to_str() {
            return Err(DatabaseError::PullRequestAlreadyMerged(id.into()));
        }

        let deleted = sqlx::query(
            r#"
            DELETE FROM pull_request_reviewer
            WHERE pull_request_id = $1
            AND reviewer_id = $2
        "#,
        )
        .bind(id)
        .bind(old_reviewer_id)
        .execute(&mut *conn)
        .await
        .map_err(Self::wrap_implementation_error)?
        .rows_affected();

        if deleted == 0 {
            return Err(DatabaseError::UnknownReviewer(
                id.into(),
                old_reviewer_id.into(),
            ));
        }

        if author_id == new_reviewer_id {
            return Err(author_as_reviewer(id));
        }

        Self::insert_reviewer(&mut *conn, id, new_reviewer_id).await?;
        Self::fetch_pull_request_expect(conn, id).await
    }

    async fn list_team_members_in(conn: &mut PgConnection, team_name: &str) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, team_name, is_active
            FROM app_user
            WHERE team_name = $1
            ORDER BY directory_position
        "#,
        )
        .bind(team_name)
        .fetch_all(conn)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_team_in(conn: &mut PgConnection, name: &str) -> Result<Option<Team>> {
        let team_name: Option<String> = sqlx::query_scalar(
            r#"
            SELECT team_name
            FROM team
            WHERE team_name = $1
        "#,
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Self::wrap_implementation_error)?;

        let Some(team_name) = team_name else {
            return Ok(None);
        };

        let members = Self::list_team_members_in(conn, &team_name).await?;
        Ok(Some(Team {
            name: team_name,
            members: members.into_iter().map(Into::into).collect(),
        }))
    }
}

#[async_trait]
impl DbService for PostgresDb {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_implementation_error)?;

        Ok(())
    }

    ////////////////
    // Pull requests

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let mut tx = self.begin().await?;
        let result = Self::create_pull_request_in(&mut tx, instance).await;
        Self::finish(tx, result).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(Self::wrap_implementation_error)?;

        Self::fetch_pull_request(&mut conn, id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_merge(
        &self,
        id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest> {
        let mut tx = self.begin().await?;
        let result = Self::merge_pull_request_in(&mut tx, id, merged_at).await;
        Self::finish(tx, result).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_by_reviewer(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        let rows = sqlx::query_as::<_, PullRequestShortRow>(
            r#"
            SELECT pull_request.pull_request_id,
                pull_request.pull_request_name,
                pull_request.author_id,
                pull_request.status
            FROM pull_request
            INNER JOIN pull_request_reviewer
                ON pull_request_reviewer.pull_request_id = pull_request.pull_request_id
            WHERE pull_request_reviewer.reviewer_id = $1
            ORDER BY pull_request.pull_request_id COLLATE "C"
        "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_request_reviewers_replace(
        &self,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<PullRequest> {
        let mut tx = self.begin().await?;
        let result = Self::replace_reviewer_in(&mut tx, id, old_reviewer_id, new_reviewer_id).await;
        Self::finish(tx, result).await
    }

    ////////
    // Teams

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, name: &str) -> Result<Team> {
        sqlx::query(
            r#"
            INSERT INTO team
            (
                team_name
            )
            VALUES
            (
                $1
            );
        "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if Self::is_unique_violation(&e) {
                DatabaseError::TeamAlreadyExists(name.into())
            } else {
                Self::wrap_implementation_error(e)
            }
        })?;

        Ok(Team {
            name: name.into(),
            members: vec![],
        })
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        let mut tx = self.begin_read_only().await?;
        let result = Self::get_team_in(&mut tx, name).await;
        Self::finish(tx, result).await
    }

    ////////
    // Users

    #[tracing::instrument(skip(self))]
    async fn users_create_or_update(&self, instance: User) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO app_user
            (
                user_id,
                username,
                team_name,
                is_active
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4
            )
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
            team_name = EXCLUDED.team_name,
            is_active = EXCLUDED.is_active
            RETURNING user_id, username, team_name, is_active
        "#,
        )
        .bind(&instance.id)
        .bind(&instance.username)
        .bind(&instance.team_name)
        .bind(instance.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if Self::is_foreign_key_violation(&e) {
                DatabaseError::UnknownTeam(instance.team_name.clone().unwrap_or_default())
            } else {
                Self::wrap_implementation_error(e)
            }
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, team_name, is_active
            FROM app_user
            WHERE user_id = $1
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_active(&self, id: &str, value: bool) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE app_user
            SET is_active = $2
            WHERE user_id = $1
            RETURNING user_id, username, team_name, is_active
        "#,
        )
        .bind(id)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::wrap_row_not_found(e, DatabaseError::UnknownUser(id.into())))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(Self::wrap_implementation_error)?;

        Self::list_team_members_in(&mut conn, team_name).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_active_ids_by_team(&self, team_name: &str) -> Result<Vec<String>> {
        sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM app_user
            WHERE team_name = $1
            AND is_active
            ORDER BY directory_position
        "#,
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)
    }

    ////////
    // Stats

    #[tracing::instrument(skip(self))]
    async fn stats_reviewer_load(&self) -> Result<Vec<ReviewerStats>> {
        let rows = sqlx::query_as::<_, ReviewerStatsRow>(
            r#"
            SELECT app_user.user_id,
                app_user.username,
                app_user.team_name,
                COUNT(pull_request.pull_request_id) AS assigned_count,
                COUNT(pull_request.pull_request_id)
                    FILTER (WHERE pull_request.status = 'OPEN') AS open_count,
                COUNT(pull_request.pull_request_id)
                    FILTER (WHERE pull_request.status = 'MERGED') AS merged_count
            FROM app_user
            LEFT JOIN pull_request_reviewer
                ON pull_request_reviewer.reviewer_id = app_user.user_id
            LEFT JOIN pull_request
                ON pull_request.pull_request_id = pull_request_reviewer.pull_request_id
            GROUP BY app_user.user_id
            ORDER BY assigned_count DESC, app_user.user_id COLLATE "C"
        "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

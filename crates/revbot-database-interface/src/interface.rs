use async_trait::async_trait;
use revbot_models::{PullRequest, PullRequestShort, ReviewerStats, Team, User};
use time::OffsetDateTime;

use crate::{DatabaseError, Result};

/// Storage contract for the user/team directory and the pull request store.
///
/// Every method is one unit of work: implementations either apply all of its
/// writes or none of them, and multi-read methods observe a single snapshot.
/// A missing row is reported with the matching `Unknown*` variant, every other
/// storage failure with [`DatabaseError::ImplementationError`]. Nothing is
/// retried.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    /// Insert the pull request and its reviewer rows atomically.
    ///
    /// Fails with [`DatabaseError::PullRequestAlreadyExists`] on an identifier
    /// collision, leaving the existing record untouched.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, id: &str) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }
    /// Mark as merged. An already merged pull request keeps its first merge date.
    async fn pull_requests_merge(&self, id: &str, merged_at: OffsetDateTime)
        -> Result<PullRequest>;
    /// Pull requests where `user_id` is a reviewer, ordered by identifier.
    async fn pull_requests_list_by_reviewer(&self, user_id: &str)
        -> Result<Vec<PullRequestShort>>;
    /// Swap one reviewer for another in a single transaction.
    ///
    /// The pull request must be open and `old_reviewer_id` must be assigned;
    /// on any failure the reviewer set is left as it was.
    async fn pull_request_reviewers_replace(
        &self,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<PullRequest>;

    async fn teams_create(&self, name: &str) -> Result<Team>;
    /// Team with its members, in directory order.
    async fn teams_get(&self, name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, name: &str) -> Result<Team> {
        self.teams_get(name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(name.into()))
    }

    /// Insert or overwrite name, team and active flag. The directory position
    /// of an existing user is kept.
    async fn users_create_or_update(&self, instance: User) -> Result<User>;
    async fn users_get(&self, id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, id: &str) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
    }
    async fn users_set_active(&self, id: &str, value: bool) -> Result<User>;
    async fn users_list_by_team(&self, team_name: &str) -> Result<Vec<User>>;
    /// Active member identifiers of a team, in directory order.
    async fn users_list_active_ids_by_team(&self, team_name: &str) -> Result<Vec<String>>;

    async fn stats_reviewer_load(&self) -> Result<Vec<ReviewerStats>>;
}

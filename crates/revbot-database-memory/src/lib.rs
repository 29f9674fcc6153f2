use std::{
    collections::{HashMap, HashSet},
    sync::RwLock,
};

use async_trait::async_trait;
use revbot_database_interface::{
    author_as_reviewer, validate_reviewer_set, DatabaseError, DbService, Result,
};
use revbot_models::{
    PullRequest, PullRequestShort, PullRequestStatus, ReviewerStats, Team, User,
};
use time::OffsetDateTime;

#[derive(Debug, Clone)]
struct UserEntry {
    position: u64,
    user: User,
}

/// In-memory storage.
///
/// Locks are always taken in the same order (teams, users, pull requests) and
/// held for the whole operation, so each call is atomic.
#[derive(Debug, Default)]
pub struct MemoryDb {
    teams: RwLock<HashSet<String>>,
    users: RwLock<HashMap<String, UserEntry>>,
    pull_requests: RwLock<HashMap<String, PullRequest>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn sorted_team_members(users: &HashMap<String, UserEntry>, team_name: &str) -> Vec<User> {
        let mut entries: Vec<_> = users
            .values()
            .filter(|e| e.user.team_name.as_deref() == Some(team_name))
            .collect();
        entries.sort_by_key(|e| e.position);
        entries.into_iter().map(|e| e.user.clone()).collect()
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    ////////////////
    // Pull requests

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let users = self.users.read().unwrap();
        let mut pull_requests = self.pull_requests.write().unwrap();

        if pull_requests.contains_key(&instance.id) {
            return Err(DatabaseError::PullRequestAlreadyExists(instance.id));
        }

        validate_reviewer_set(&instance)?;

        if !users.contains_key(&instance.author_id) {
            return Err(DatabaseError::UnknownUser(instance.author_id));
        }

        let mut seen = HashSet::new();
        for reviewer in &instance.reviewers {
            if !users.contains_key(reviewer) {
                return Err(DatabaseError::UnknownUser(reviewer.clone()));
            }
            if !seen.insert(reviewer) {
                return Err(DatabaseError::ReviewerAlreadyAssigned(
                    instance.id.clone(),
                    reviewer.clone(),
                ));
            }
        }

        pull_requests.insert(instance.id.clone(), instance.clone());
        Ok(instance)
    }

    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
        Ok(self.pull_requests.read().unwrap().get(id).cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_merge(
        &self,
        id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<PullRequest> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        let pr = pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;

        if !pr.is_merged() {
            pr.status = PullRequestStatus::Merged;
            pr.merged_at = Some(merged_at);
        }

        Ok(pr.clone())
    }

    async fn pull_requests_list_by_reviewer(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        let mut values: Vec<_> = self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .filter(|pr| pr.has_reviewer(user_id))
            .map(PullRequest::to_short)
            .collect();
        values.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(values)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_request_reviewers_replace(
        &self,
        id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<PullRequest> {
        let users = self.users.read().unwrap();
        let mut pull_requests = self.pull_requests.write().unwrap();
        let pr = pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;

        if pr.is_merged() {
            return Err(DatabaseError::PullRequestAlreadyMerged(id.into()));
        }

        let position = pr
            .reviewers
            .iter()
            .position(|r| r == old_reviewer_id)
            .ok_or_else(|| DatabaseError::UnknownReviewer(id.into(), old_reviewer_id.into()))?;

        if pr.author_id == new_reviewer_id {
            return Err(author_as_reviewer(id));
        }

        if pr.has_reviewer(new_reviewer_id) {
            return Err(DatabaseError::ReviewerAlreadyAssigned(
                id.into(),
                new_reviewer_id.into(),
            ));
        }

        if !users.contains_key(new_reviewer_id) {
            return Err(DatabaseError::UnknownUser(new_reviewer_id.into()));
        }

        pr.reviewers.remove(position);
        pr.reviewers.push(new_reviewer_id.into());
        Ok(pr.clone())
    }

    ////////
    // Teams

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, name: &str) -> Result<Team> {
        if !self.teams.write().unwrap().insert(name.into()) {
            return Err(DatabaseError::TeamAlreadyExists(name.into()));
        }

        Ok(Team {
            name: name.into(),
            members: vec![],
        })
    }

    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        let teams = self.teams.read().unwrap();
        if !teams.contains(name) {
            return Ok(None);
        }

        let users = self.users.read().unwrap();
        Ok(Some(Team {
            name: name.into(),
            members: Self::sorted_team_members(&users, name)
                .into_iter()
                .map(Into::into)
                .collect(),
        }))
    }

    ////////
    // Users

    #[tracing::instrument(skip(self))]
    async fn users_create_or_update(&self, instance: User) -> Result<User> {
        let teams = self.teams.read().unwrap();
        if let Some(team_name) = &instance.team_name {
            if !teams.contains(team_name) {
                return Err(DatabaseError::UnknownTeam(team_name.clone()));
            }
        }

        let mut users = self.users.write().unwrap();
        let position = match users.get(&instance.id) {
            Some(entry) => entry.position,
            None => users.values().map(|e| e.position).max().unwrap_or(0) + 1,
        };

        users.insert(
            instance.id.clone(),
            UserEntry {
                position,
                user: instance.clone(),
            },
        );
        Ok(instance)
    }

    async fn users_get(&self, id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .get(id)
            .map(|e| e.user.clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_active(&self, id: &str, value: bool) -> Result<User> {
        let mut users = self.users.write().unwrap();
        let entry = users
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))?;

        entry.user.is_active = value;
        Ok(entry.user.clone())
    }

    async fn users_list_by_team(&self, team_name: &str) -> Result<Vec<User>> {
        Ok(Self::sorted_team_members(
            &self.users.read().unwrap(),
            team_name,
        ))
    }

    async fn users_list_active_ids_by_team(&self, team_name: &str) -> Result<Vec<String>> {
        Ok(
            Self::sorted_team_members(&self.users.read().unwrap(), team_name)
                .into_iter()
                .filter(|u| u.is_active)
                .map(|u| u.id)
                .collect(),
        )
    }

    ////////
    // Stats

    async fn stats_reviewer_load(&self) -> Result<Vec<ReviewerStats>> {
        let users = self.users.read().unwrap();
        let pull_requests = self.pull_requests.read().unwrap();

        let mut values: Vec<_> = users
            .values()
            .map(|entry| {
                let mut stats = ReviewerStats {
                    user_id: entry.user.id.clone(),
                    username: entry.user.username.clone(),
                    team_name: entry.user.team_name.clone(),
                    ..Default::default()
                };

                for pr in pull_requests
                    .values()
                    .filter(|pr| pr.has_reviewer(&entry.user.id))
                {
                    stats.assigned_count += 1;
                    match pr.status {
                        PullRequestStatus::Open => stats.open_count += 1,
                        PullRequestStatus::Merged => stats.merged_count += 1,
                    }
                }

                stats
            })
            .collect();
        values.sort_by(|a, b| {
            b.assigned_count
                .cmp(&a.assigned_count)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(values)
    }
}

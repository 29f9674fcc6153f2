use pretty_assertions::assert_eq;
use revbot_models::{PullRequest, ReviewerStats, User};
use time::OffsetDateTime;

use crate::testcase::db_test_case;

#[tokio::test]
async fn reviewer_load() {
    db_test_case("reviewer_stats_reviewer_load", |db| async move {
        assert_eq!(db.stats_reviewer_load().await?, Vec::<ReviewerStats>::new());

        db.teams_create("backend").await?;
        for id in ["u1", "u2", "u3", "u4"] {
            db.users_create_or_update(User {
                id: id.into(),
                username: format!("user-{id}"),
                team_name: Some("backend".into()),
                is_active: true,
            })
            .await?;
        }

        let created_at = OffsetDateTime::from_unix_timestamp(1_700_000_000)?;
        for (id, reviewers) in [("pr-1", vec!["u3", "u2"]), ("pr-2", vec!["u3"])] {
            db.pull_requests_create(
                PullRequest::new(id, id, "u1", created_at)
                    .with_reviewers(reviewers.into_iter().map(Into::into).collect()),
            )
            .await?;
        }
        db.pull_requests_merge("pr-1", created_at).await?;

        let stats = |user_id: &str, assigned_count, open_count, merged_count| ReviewerStats {
            user_id: user_id.into(),
            username: format!("user-{user_id}"),
            team_name: Some("backend".into()),
            assigned_count,
            open_count,
            merged_count,
        };

        assert_eq!(
            db.stats_reviewer_load().await?,
            vec![
                stats("u3", 2, 1, 1),
                stats("u2", 1, 0, 1),
                stats("u1", 0, 0, 0),
                stats("u4", 0, 0, 0),
            ]
        );

        Ok(())
    })
    .await;
}

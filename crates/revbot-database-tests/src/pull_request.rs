use pretty_assertions::assert_eq;
use revbot_database_interface::{DatabaseError, DbService};
use revbot_models::{PullRequest, PullRequestShort, PullRequestStatus, User};
use time::OffsetDateTime;

use crate::testcase::db_test_case;

fn at(timestamp: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(timestamp).unwrap()
}

async fn seed_team(db: &dyn DbService) -> Result<(), DatabaseError> {
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

    Ok(())
}

fn open_pull_request(id: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest::new(id, &format!("Change {id}"), "u1", at(1_700_000_000))
        .with_reviewers(reviewers.iter().map(|r| r.to_string()).collect())
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        seed_team(db.as_ref()).await?;

        let pr = db
            .pull_requests_create(open_pull_request("pr-1", &["u3", "u2"]))
            .await?;
        assert_eq!(pr, open_pull_request("pr-1", &["u3", "u2"]));
        assert_eq!(db.pull_requests_get("pr-1").await?, Some(pr));

        let solo = db
            .pull_requests_create(open_pull_request("pr-2", &[]))
            .await?;
        assert!(solo.need_more_reviewers());
        assert_eq!(solo.reviewers, Vec::<String>::new());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_duplicate_keeps_existing() {
    db_test_case("pull_request_create_duplicate", |db| async move {
        seed_team(db.as_ref()).await?;
        db.pull_requests_create(open_pull_request("pr-1", &["u2"]))
            .await?;

        let mut other = open_pull_request("pr-1", &["u3", "u4"]);
        other.name = "Other".into();
        assert!(matches!(
            db.pull_requests_create(other).await,
            Err(DatabaseError::PullRequestAlreadyExists(id)) if id == "pr-1"
        ));

        let stored = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(stored.name, "Change pr-1");
        assert_eq!(stored.reviewers, vec!["u2"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_with_unknown_user_stores_nothing() {
    db_test_case("pull_request_create_unknown_user", |db| async move {
        seed_team(db.as_ref()).await?;

        assert!(matches!(
            db.pull_requests_create(open_pull_request("pr-1", &["u2", "ghost"]))
                .await,
            Err(DatabaseError::UnknownUser(id)) if id == "ghost"
        ));
        assert_eq!(db.pull_requests_get("pr-1").await?, None);

        let mut orphan = open_pull_request("pr-2", &[]);
        orphan.author_id = "ghost".into();
        assert!(matches!(
            db.pull_requests_create(orphan).await,
            Err(DatabaseError::UnknownUser(id)) if id == "ghost"
        ));
        assert_eq!(db.pull_requests_get("pr-2").await?, None);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn create_rejects_invalid_reviewer_set() {
    db_test_case("pull_request_create_invalid_reviewers", |db| async move {
        seed_team(db.as_ref()).await?;

        assert!(matches!(
            db.pull_requests_create(open_pull_request("pr-1", &["u2", "u1"]))
                .await,
            Err(DatabaseError::InvalidReviewerSet(id, _)) if id == "pr-1"
        ));
        assert!(matches!(
            db.pull_requests_create(open_pull_request("pr-2", &["u2", "u3", "u4"]))
                .await,
            Err(DatabaseError::InvalidReviewerSet(id, _)) if id == "pr-2"
        ));
        assert_eq!(db.pull_requests_get("pr-1").await?, None);
        assert_eq!(db.pull_requests_get("pr-2").await?, None);
        assert_eq!(
            db.pull_requests_list_by_reviewer("u2").await?,
            Vec::<PullRequestShort>::new()
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn merge() {
    db_test_case("pull_request_merge", |db| async move {
        assert!(matches!(
            db.pull_requests_merge("pr-1", at(1_700_000_100)).await,
            Err(DatabaseError::UnknownPullRequest(id)) if id == "pr-1"
        ));

        seed_team(db.as_ref()).await?;
        db.pull_requests_create(open_pull_request("pr-1", &["u2", "u3"]))
            .await?;

        let merged = db.pull_requests_merge("pr-1", at(1_700_000_100)).await?;
        assert_eq!(merged.status, PullRequestStatus::Merged);
        assert_eq!(merged.merged_at, Some(at(1_700_000_100)));
        assert_eq!(merged.reviewers, vec!["u2", "u3"]);

        let again = db.pull_requests_merge("pr-1", at(1_700_000_200)).await?;
        assert_eq!(again, merged);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_reviewer() {
    db_test_case("pull_request_replace_reviewer", |db| async move {
        seed_team(db.as_ref()).await?;
        db.pull_requests_create(open_pull_request("pr-1", &["u2", "u3"]))
            .await?;

        let pr = db.pull_request_reviewers_replace("pr-1", "u2", "u4").await?;
        assert_eq!(pr.reviewers, vec!["u3", "u4"]);
        assert_eq!(db.pull_requests_get_expect("pr-1").await?, pr);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_reviewer_failures_leave_reviewers() {
    db_test_case("pull_request_replace_reviewer_failures", |db| async move {
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u2", "u4").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed_team(db.as_ref()).await?;
        db.pull_requests_create(open_pull_request("pr-1", &["u2", "u3"]))
            .await?;

        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u4", "u1").await,
            Err(DatabaseError::UnknownReviewer(pr, user)) if pr == "pr-1" && user == "u4"
        ));
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u2", "u3").await,
            Err(DatabaseError::ReviewerAlreadyAssigned(_, user)) if user == "u3"
        ));
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u2", "u1").await,
            Err(DatabaseError::InvalidReviewerSet(pr, _)) if pr == "pr-1"
        ));
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u2", "ghost").await,
            Err(DatabaseError::UnknownUser(user)) if user == "ghost"
        ));
        assert_eq!(
            db.pull_requests_get_expect("pr-1").await?.reviewers,
            vec!["u2", "u3"]
        );

        db.pull_requests_merge("pr-1", at(1_700_000_100)).await?;
        assert!(matches!(
            db.pull_request_reviewers_replace("pr-1", "u2", "u4").await,
            Err(DatabaseError::PullRequestAlreadyMerged(_))
        ));
        assert_eq!(
            db.pull_requests_get_expect("pr-1").await?.reviewers,
            vec!["u2", "u3"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_reviewer() {
    db_test_case("pull_request_list_by_reviewer", |db| async move {
        assert_eq!(
            db.pull_requests_list_by_reviewer("u2").await?,
            Vec::<PullRequestShort>::new()
        );

        seed_team(db.as_ref()).await?;
        db.pull_requests_create(open_pull_request("pr-2", &["u2"]))
            .await?;
        db.pull_requests_create(open_pull_request("pr-1", &["u3", "u2"]))
            .await?;
        db.pull_requests_create(open_pull_request("pr-3", &["u3"]))
            .await?;
        db.pull_requests_merge("pr-2", at(1_700_000_100)).await?;

        assert_eq!(
            db.pull_requests_list_by_reviewer("u2").await?,
            vec![
                PullRequestShort {
                    id: "pr-1".into(),
                    name: "Change pr-1".into(),
                    author_id: "u1".into(),
                    status: PullRequestStatus::Open
                },
                PullRequestShort {
                    id: "pr-2".into(),
                    name: "Change pr-2".into(),
                    author_id: "u1".into(),
                    status: PullRequestStatus::Merged
                }
            ]
        );
        assert_eq!(
            db.pull_requests_list_by_reviewer("u1").await?,
            Vec::<PullRequestShort>::new()
        );

        Ok(())
    })
    .await;
}

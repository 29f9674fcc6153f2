use pretty_assertions::assert_eq;
use revbot_database_interface::DatabaseError;
use revbot_models::User;

use crate::testcase::db_test_case;

fn member(id: &str, team_name: &str) -> User {
    User {
        id: id.into(),
        username: format!("user-{id}"),
        team_name: Some(team_name.into()),
        is_active: true,
    }
}

#[tokio::test]
async fn create_or_update() {
    db_test_case("user_create_or_update", |db| async move {
        assert!(matches!(
            db.users_create_or_update(member("u1", "backend")).await,
            Err(DatabaseError::UnknownTeam(name)) if name == "backend"
        ));

        db.teams_create("backend").await?;
        db.teams_create("frontend").await?;

        let user = db.users_create_or_update(member("u1", "backend")).await?;
        assert_eq!(user, member("u1", "backend"));
        assert_eq!(db.users_get("u1").await?, Some(user));

        let moved = db
            .users_create_or_update(User {
                username: "renamed".into(),
                is_active: false,
                ..member("u1", "frontend")
            })
            .await?;
        assert_eq!(moved.username, "renamed");
        assert_eq!(db.users_get_expect("u1").await?, moved);
        assert_eq!(db.users_list_by_team("backend").await?, Vec::<User>::new());
        assert_eq!(db.users_list_by_team("frontend").await?, vec![moved]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update_keeps_directory_order() {
    db_test_case("user_update_keeps_directory_order", |db| async move {
        db.teams_create("backend").await?;
        db.users_create_or_update(member("zed", "backend")).await?;
        db.users_create_or_update(member("amy", "backend")).await?;
        db.users_create_or_update(member("bob", "backend")).await?;

        db.users_create_or_update(User {
            username: "Zed".into(),
            ..member("zed", "backend")
        })
        .await?;

        let ids: Vec<_> = db
            .users_list_by_team("backend")
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["zed", "amy", "bob"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn set_active() {
    db_test_case("user_set_active", |db| async move {
        assert!(matches!(
            db.users_set_active("u1", false).await,
            Err(DatabaseError::UnknownUser(id)) if id == "u1"
        ));

        db.teams_create("backend").await?;
        db.users_create_or_update(member("u1", "backend")).await?;
        db.users_create_or_update(member("u2", "backend")).await?;
        db.users_create_or_update(member("u3", "backend")).await?;

        let user = db.users_set_active("u2", false).await?;
        assert!(!user.is_active);
        assert_eq!(
            db.users_list_active_ids_by_team("backend").await?,
            vec!["u1", "u3"]
        );

        db.users_set_active("u2", true).await?;
        assert_eq!(
            db.users_list_active_ids_by_team("backend").await?,
            vec!["u1", "u2", "u3"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get_unknown() {
    db_test_case("user_get_unknown", |db| async move {
        assert_eq!(db.users_get("nobody").await?, None);
        assert!(matches!(
            db.users_get_expect("nobody").await,
            Err(DatabaseError::UnknownUser(_))
        ));
        assert_eq!(
            db.users_list_active_ids_by_team("nowhere").await?,
            Vec::<String>::new()
        );

        Ok(())
    })
    .await;
}

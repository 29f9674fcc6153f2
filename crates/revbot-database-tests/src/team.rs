use pretty_assertions::assert_eq;
use revbot_database_interface::DatabaseError;
use revbot_models::{Team, TeamMember, User};

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        let team = db.teams_create("backend").await?;
        assert_eq!(
            team,
            Team {
                name: "backend".into(),
                members: vec![]
            }
        );

        assert!(matches!(
            db.teams_create("backend").await,
            Err(DatabaseError::TeamAlreadyExists(name)) if name == "backend"
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get() {
    db_test_case("team_get", |db| async move {
        assert_eq!(db.teams_get("backend").await?, None);
        assert!(matches!(
            db.teams_get_expect("backend").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        db.teams_create("backend").await?;
        db.teams_create("frontend").await?;
        for (id, team_name, is_active) in [
            ("u2", "backend", true),
            ("u1", "backend", false),
            ("u3", "frontend", true),
        ] {
            db.users_create_or_update(User {
                id: id.into(),
                username: format!("user-{id}"),
                team_name: Some(team_name.into()),
                is_active,
            })
            .await?;
        }

        assert_eq!(
            db.teams_get_expect("backend").await?,
            Team {
                name: "backend".into(),
                members: vec![
                    TeamMember {
                        user_id: "u2".into(),
                        username: "user-u2".into(),
                        is_active: true
                    },
                    TeamMember {
                        user_id: "u1".into(),
                        username: "user-u1".into(),
                        is_active: false
                    }
                ]
            }
        );

        Ok(())
    })
    .await;
}

use revbot_config::Config;
use revbot_database_interface::DbService;

use crate::CoreModule;

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use revbot_config::Config;
    use revbot_database_interface::DbService;
    use revbot_database_memory::MemoryDb;
    use revbot_models::User;

    use crate::{CoreContext, CoreModule};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version().unwrap(),
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
            }
        }

        /// Create `team_name` with `(user_id, is_active)` members, in order.
        #[allow(dead_code)]
        pub async fn with_team(self, team_name: &str, members: &[(&str, bool)]) -> Self {
            self.db_service.teams_create(team_name).await.unwrap();
            for (user_id, is_active) in members {
                self.db_service
                    .users_create_or_update(User {
                        id: user_id.to_string(),
                        username: user_id.to_uppercase(),
                        team_name: Some(team_name.into()),
                        is_active: *is_active,
                    })
                    .await
                    .unwrap();
            }

            self
        }

        /// Create an active user outside any team.
        #[allow(dead_code)]
        pub async fn with_teamless_user(self, user_id: &str) -> Self {
            self.db_service
                .users_create_or_update(User {
                    id: user_id.into(),
                    username: user_id.to_uppercase(),
                    team_name: None,
                    is_active: true,
                })
                .await
                .unwrap();

            self
        }
    }
}

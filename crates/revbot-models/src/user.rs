use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Only unset for users not yet attached by a team creation.
    pub team_name: Option<String>,
    pub is_active: bool,
}

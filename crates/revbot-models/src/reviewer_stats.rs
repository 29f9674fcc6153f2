use serde::{Deserialize, Serialize};

/// Review load of one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerStats {
    pub user_id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub assigned_count: u64,
    pub open_count: u64,
    pub merged_count: u64,
}

//! Domain models.

mod pull_request;
mod pull_request_status;
mod reviewer_stats;
mod team;
mod user;

pub use pull_request::{PullRequest, PullRequestShort, MAX_REVIEWERS};
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use reviewer_stats::ReviewerStats;
pub use team::{Team, TeamMember};
pub use user::User;

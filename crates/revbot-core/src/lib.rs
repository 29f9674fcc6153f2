//! Reviewer assignment engine.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, ErrorKind, Result};
use shaku::module;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest,
        list_assigned_pull_requests::ListAssignedPullRequests,
        merge_pull_request::MergePullRequest, reassign_pull_request::ReassignPullRequest,
    },
    stats::get_reviewer_load::GetReviewerLoad,
    teams::{create_team::CreateTeam, get_team::GetTeam},
    users::set_user_active::SetUserActive,
};

module! {
    pub CoreModule {
        components = [
            CreatePullRequest, ReassignPullRequest, MergePullRequest,
            ListAssignedPullRequests, CreateTeam, GetTeam, SetUserActive,
            GetReviewerLoad
        ],
        providers = []
    }
}

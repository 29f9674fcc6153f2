pub(crate) mod create_pull_request;
pub(crate) mod list_assigned_pull_requests;
pub(crate) mod merge_pull_request;
pub(crate) mod reassign_pull_request;

pub use create_pull_request::CreatePullRequestInterface;
pub use list_assigned_pull_requests::ListAssignedPullRequestsInterface;
pub use merge_pull_request::MergePullRequestInterface;
pub use reassign_pull_request::{ReassignPullRequestInterface, ReassignedPullRequest};

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_pull_request::MockCreatePullRequestInterface,
    list_assigned_pull_requests::MockListAssignedPullRequestsInterface,
    merge_pull_request::MockMergePullRequestInterface,
    reassign_pull_request::MockReassignPullRequestInterface,
};

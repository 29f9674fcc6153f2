pub(crate) mod get_reviewer_load;

pub use get_reviewer_load::GetReviewerLoadInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::get_reviewer_load::MockGetReviewerLoadInterface;

mod testcase;

#[cfg(test)]
mod pull_request;
#[cfg(test)]
mod reviewer_stats;
#[cfg(test)]
mod team;
#[cfg(test)]
mod user;

pub use testcase::{db_test_case, db_test_case_pg};

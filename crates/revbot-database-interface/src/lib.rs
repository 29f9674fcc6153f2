mod errors;
mod interface;
mod validation;

pub use errors::{DatabaseError, Result};
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockDbService;
pub use interface::DbService;
pub use validation::{author_as_reviewer, validate_reviewer_set};

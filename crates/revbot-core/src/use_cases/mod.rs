pub mod pulls;
pub mod reviews;
pub mod stats;
pub mod teams;
pub mod users;

use crate::{DomainError, Result};

/// Reject blank identifiers before touching storage.
pub(crate) fn ensure_not_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_input(format!("{field} must not be empty")));
    }

    Ok(())
}

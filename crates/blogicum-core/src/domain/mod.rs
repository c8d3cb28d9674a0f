//! Domain entities - the core business objects.

mod category;
mod comment;
mod entry;
mod location;
mod page;
mod post;
mod user;
mod viewer;

pub use category::{Category, CategoryContent};
pub use comment::Comment;
pub use entry::{CommentEntry, PostDetail, PostEntry};
pub use location::{Location, LocationContent};
pub use page::{Page, PageRequest};
pub use post::{Post, PostContent};
pub use user::{ProfileChanges, User, validate_email, validate_username};
pub use viewer::Viewer;

use crate::error::DomainError;

/// Upper bound for titles, names, usernames and comment bodies.
pub const MAX_CHARACTER_LENGTH: usize = 256;

/// Check a required text field: not blank, at most `max` characters.
pub(crate) fn require_text(field: &str, value: &str, max: Option<usize>) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(DomainError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MAX_CHARACTER_LENGTH, require_text};
use crate::error::DomainError;

/// Category entity - a thematic section addressed by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Administrator-editable fields of a category.
#[derive(Debug, Clone)]
pub struct CategoryContent {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl CategoryContent {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title, Some(MAX_CHARACTER_LENGTH))?;
        require_text("description", &self.description, None)?;
        validate_slug(&self.slug)
    }
}

impl Category {
    pub fn new(content: CategoryContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: content.title,
            description: content.description,
            slug: content.slug,
            is_published: content.is_published,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, content: CategoryContent) {
        self.title = content.title;
        self.description = content.description;
        self.slug = content.slug;
        self.is_published = content.is_published;
    }
}

/// Slugs appear in URLs: ASCII letters, digits, hyphen and underscore.
fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(DomainError::Validation(
            "slug may only contain latin letters, digits, hyphen and underscore".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(slug: &str) -> CategoryContent {
        CategoryContent {
            title: "Travel".to_string(),
            description: "Trips and places".to_string(),
            slug: slug.to_string(),
            is_published: true,
        }
    }

    #[test]
    fn test_slug_validation() {
        assert!(content("travel_notes-2024").validate().is_ok());
        assert!(content("").validate().is_err());
        assert!(content("путешествия").validate().is_err());
        assert!(content("with space").validate().is_err());
    }
}

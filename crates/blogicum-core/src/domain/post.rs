use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MAX_CHARACTER_LENGTH, require_text};
use crate::error::DomainError;

/// Post entity - a publication written by one author.
///
/// A post can be scheduled by giving it a `pub_date` in the future and
/// hidden by clearing `is_published`; see [`crate::policy::visibility`]
/// for who gets to see it in either case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Author-editable fields of a post.
#[derive(Debug, Clone)]
pub struct PostContent {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
}

impl PostContent {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title, Some(MAX_CHARACTER_LENGTH))?;
        require_text("text", &self.text, None)
    }
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, content: PostContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: content.title,
            text: content.text,
            image: content.image,
            pub_date: content.pub_date,
            location_id: content.location_id,
            category_id: content.category_id,
            is_published: content.is_published,
            created_at: Utc::now(),
        }
    }

    /// Replace the editable fields, keeping identity and authorship.
    pub fn apply(&mut self, content: PostContent) {
        self.title = content.title;
        self.text = content.text;
        self.image = content.image;
        self.pub_date = content.pub_date;
        self.location_id = content.location_id;
        self.category_id = content.category_id;
        self.is_published = content.is_published;
    }
}

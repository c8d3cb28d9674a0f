use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MAX_CHARACTER_LENGTH, require_text};
use crate::error::DomainError;

/// Location entity - where a post was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LocationContent {
    pub name: String,
    pub is_published: bool,
}

impl LocationContent {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, Some(MAX_CHARACTER_LENGTH))
    }
}

impl Location {
    pub fn new(content: LocationContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: content.name,
            is_published: content.is_published,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, content: LocationContent) {
        self.name = content.name;
        self.is_published = content.is_published;
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MAX_CHARACTER_LENGTH, require_text};
use crate::error::DomainError;

/// User entity - an account that writes posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable profile fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            password_hash,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Roles embedded into access tokens.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec!["user".to_string()];
        if self.is_admin {
            roles.push("admin".to_string());
        }
        roles
    }

    pub fn apply_profile(&mut self, changes: ProfileChanges) -> Result<(), DomainError> {
        validate_username(&changes.username)?;
        validate_email(&changes.email)?;
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.username = changes.username;
        self.email = changes.email;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Usernames are non-empty and limited to letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    require_text("username", username, Some(MAX_CHARACTER_LENGTH))?;
    let allowed = |c: char| c.is_alphanumeric() || "@.+-_".contains(c);
    if !username.chars().all(allowed) {
        return Err(DomainError::Validation(
            "username may only contain letters, digits and @/./+/-/_".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

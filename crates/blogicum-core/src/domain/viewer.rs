use uuid::Uuid;

/// The identity making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User { id: Uuid, username: String },
}

impl Viewer {
    pub fn user(id: Uuid, username: impl Into<String>) -> Self {
        Self::User {
            id,
            username: username.into(),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { id, .. } => Some(*id),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User { username, .. } => Some(username),
        }
    }

    /// True when the viewer is the user with the given id.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.id() == Some(user_id)
    }
}

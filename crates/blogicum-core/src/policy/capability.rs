//! Author-only mutation guard shared by posts and comments.

use uuid::Uuid;

use crate::domain::{Comment, Post, Viewer};
use crate::error::DomainError;

/// Content that belongs to a single author.
pub trait Owned {
    fn author_id(&self) -> Uuid;

    /// The post whose detail view shows this item.
    fn detail_post_id(&self) -> Uuid;
}

impl Owned for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn detail_post_id(&self) -> Uuid {
        self.id
    }
}

impl Owned for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }

    fn detail_post_id(&self) -> Uuid {
        self.post_id
    }
}

/// Only the author may edit or delete an item.
pub fn can_mutate(viewer: &Viewer, item: &impl Owned) -> bool {
    viewer.is(item.author_id())
}

/// Like [`can_mutate`], but fails with [`DomainError::NotAuthor`] pointing
/// back at the item's post.
pub fn ensure_can_mutate(viewer: &Viewer, item: &impl Owned) -> Result<(), DomainError> {
    if can_mutate(viewer, item) {
        Ok(())
    } else {
        tracing::warn!(
            viewer = ?viewer.id(),
            post_id = %item.detail_post_id(),
            "Rejected mutation by non-author"
        );
        Err(DomainError::NotAuthor {
            post_id: item.detail_post_id(),
        })
    }
}

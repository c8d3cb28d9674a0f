use std::sync::Arc;

use uuid::Uuid;

use super::{load_visible_post, require_user};
use crate::domain::{Comment, Viewer};
use crate::error::DomainError;
use crate::policy::ensure_can_mutate;
use crate::ports::{Clock, Repositories};

/// Comment creation, editing and deletion.
#[derive(Clone)]
pub struct CommentService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl CommentService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Comment on a post the viewer can see.
    pub async fn create(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        text: String,
    ) -> Result<Comment, DomainError> {
        let author_id = require_user(viewer)?;
        load_visible_post(&self.repos, viewer, post_id, self.clock.now()).await?;
        Comment::validate_text(&text)?;

        let comment = self
            .repos
            .comments
            .save(Comment::new(post_id, author_id, text))
            .await?;
        tracing::info!(comment_id = %comment.id, %post_id, "Comment added");
        Ok(comment)
    }

    pub async fn update(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
        text: String,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.find(post_id, comment_id).await?;
        ensure_can_mutate(viewer, &comment)?;
        Comment::validate_text(&text)?;

        comment.text = text;
        Ok(self.repos.comments.save(comment).await?)
    }

    pub async fn delete(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), DomainError> {
        let comment = self.find(post_id, comment_id).await?;
        ensure_can_mutate(viewer, &comment)?;

        self.repos.comments.delete(comment_id).await?;
        tracing::info!(%comment_id, %post_id, "Comment deleted");
        Ok(())
    }

    async fn find(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.repos
            .comments
            .find_in_post(comment_id, post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))
    }
}

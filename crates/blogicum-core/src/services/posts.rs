use uuid::Uuid;

use super::require_user;
use crate::domain::{Post, PostContent, Viewer};
use crate::error::DomainError;
use crate::policy::ensure_can_mutate;
use crate::ports::Repositories;

/// Post creation, editing and deletion.
#[derive(Clone)]
pub struct PostService {
    repos: Repositories,
}

impl PostService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, viewer: &Viewer, content: PostContent) -> Result<Post, DomainError> {
        let author_id = require_user(viewer)?;
        self.check_content(&content).await?;

        let post = self.repos.posts.save(Post::new(author_id, content)).await?;
        tracing::info!(post_id = %post.id, %author_id, "Post created");
        Ok(post)
    }

    pub async fn update(
        &self,
        viewer: &Viewer,
        post_id: Uuid,
        content: PostContent,
    ) -> Result<Post, DomainError> {
        let mut post = self.find(post_id).await?;
        ensure_can_mutate(viewer, &post)?;
        self.check_content(&content).await?;

        post.apply(content);
        let post = self.repos.posts.save(post).await?;
        tracing::info!(%post_id, "Post updated");
        Ok(post)
    }

    /// Delete a post along with its comments.
    pub async fn delete(&self, viewer: &Viewer, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.find(post_id).await?;
        ensure_can_mutate(viewer, &post)?;

        self.repos.posts.delete(post_id).await?;
        tracing::info!(%post_id, "Post deleted");
        Ok(())
    }

    async fn find(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", post_id))
    }

    async fn check_content(&self, content: &PostContent) -> Result<(), DomainError> {
        content.validate()?;

        if let Some(category_id) = content.category_id {
            if self.repos.categories.find_by_id(category_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "unknown category {category_id}"
                )));
            }
        }
        if let Some(location_id) = content.location_id {
            if self.repos.locations.find_by_id(location_id).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "unknown location {location_id}"
                )));
            }
        }
        Ok(())
    }
}

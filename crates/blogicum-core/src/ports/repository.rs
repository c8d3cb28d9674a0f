use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, Comment, CommentEntry, Location, Page, PageRequest, Post, PostEntry, User,
};
use crate::error::RepoError;
use crate::policy::PostFilter;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// Deleting a post removes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `filter`, newest `pub_date` first, one page at a time.
    async fn find_page(
        &self,
        filter: &PostFilter,
        request: PageRequest,
    ) -> Result<Page<PostEntry>, RepoError>;

    /// A single post with its relations and comment count, regardless of
    /// visibility.
    async fn find_entry(&self, id: Uuid) -> Result<Option<PostEntry>, RepoError>;
}

/// Category repository.
///
/// Deleting a category detaches its posts instead of removing them.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// Published categories ordered by slug.
    async fn list_published(&self) -> Result<Vec<Category>, RepoError>;
}

/// Location repository.
///
/// Deleting a location detaches its posts instead of removing them.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {
    /// Published locations ordered by name.
    async fn list_published(&self) -> Result<Vec<Location>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post, oldest first.
    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<CommentEntry>, RepoError>;

    /// A comment, provided it belongs to `post_id`.
    async fn find_in_post(
        &self,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Comment>, RepoError>;
}

/// Every repository the services need, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

//! Feed composition: the global feed, category feeds, profile feeds and
//! single-post retrieval.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::load_visible_post;
use crate::domain::{Category, Page, PageRequest, PostDetail, PostEntry, User, Viewer};
use crate::error::DomainError;
use crate::policy::{PostFilter, Scope};
use crate::ports::{Clock, Repositories};

/// Default number of posts per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// A category together with one page of its posts.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryFeed {
    pub category: Category,
    pub posts: Page<PostEntry>,
}

/// A user profile together with one page of the user's posts.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileFeed {
    pub profile: User,
    pub posts: Page<PostEntry>,
}

/// Builds viewer-specific post listings.
#[derive(Clone)]
pub struct FeedService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
    page_size: u64,
}

impl FeedService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>, page_size: u64) -> Self {
        Self {
            repos,
            clock,
            page_size,
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// All live posts.
    pub async fn list_feed(&self, viewer: &Viewer, page: u64) -> Result<Page<PostEntry>, DomainError> {
        self.list(viewer, Scope::Global, page).await
    }

    /// Live posts of a published category.
    ///
    /// An unknown or unpublished category is `NotFound`, whatever the state
    /// of its posts.
    pub async fn list_category(
        &self,
        viewer: &Viewer,
        slug: &str,
        page: u64,
    ) -> Result<CategoryFeed, DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("Category", slug))?;

        let posts = self.list(viewer, Scope::Category(category.id), page).await?;
        Ok(CategoryFeed { category, posts })
    }

    /// Posts written by `username`; the author also sees drafts and
    /// scheduled posts.
    pub async fn list_profile(
        &self,
        viewer: &Viewer,
        username: &str,
        page: u64,
    ) -> Result<ProfileFeed, DomainError> {
        let profile = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("User", username))?;

        let posts = self.list(viewer, Scope::Profile(profile.id), page).await?;
        Ok(ProfileFeed { profile, posts })
    }

    /// A single post with its comments.
    pub async fn get_post(&self, viewer: &Viewer, post_id: Uuid) -> Result<PostDetail, DomainError> {
        let entry = load_visible_post(&self.repos, viewer, post_id, self.clock.now()).await?;
        let comments = self.repos.comments.find_for_post(post_id).await?;
        Ok(PostDetail { entry, comments })
    }

    async fn list(
        &self,
        viewer: &Viewer,
        scope: Scope,
        page: u64,
    ) -> Result<Page<PostEntry>, DomainError> {
        let request = PageRequest::new(page, self.page_size)?;
        let filter = PostFilter::compose(viewer, scope, self.clock.now());
        tracing::debug!(?scope, ?filter, page, "Listing posts");

        Ok(self.repos.posts.find_page(&filter, request).await?)
    }
}

//! Application services composed from the ports.

mod comments;
mod feed;
mod posts;

pub use comments::CommentService;
pub use feed::{CategoryFeed, DEFAULT_PAGE_SIZE, FeedService, ProfileFeed};
pub use posts::PostService;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{PostEntry, Viewer};
use crate::error::DomainError;
use crate::policy::can_view;
use crate::ports::Repositories;

/// Fetch a post the viewer is allowed to see.
///
/// Hidden posts are reported as missing so their existence does not leak.
pub(crate) async fn load_visible_post(
    repos: &Repositories,
    viewer: &Viewer,
    post_id: Uuid,
    now: DateTime<Utc>,
) -> Result<PostEntry, DomainError> {
    let entry = repos
        .posts
        .find_entry(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id))?;

    if !can_view(viewer, &entry.post, entry.category.as_ref(), now) {
        tracing::debug!(%post_id, "Post hidden from viewer");
        return Err(DomainError::not_found("Post", post_id));
    }

    Ok(entry)
}

/// The authenticated user id, or `Unauthorized` for anonymous viewers.
pub(crate) fn require_user(viewer: &Viewer) -> Result<Uuid, DomainError> {
    viewer.id().ok_or(DomainError::Unauthorized)
}

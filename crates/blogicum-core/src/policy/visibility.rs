//! Post visibility.
//!
//! A post is *live* when it is published, its publication time has come and
//! its category (when it has one) is published. A post without a category is
//! not suppressed for that reason alone. Non-live posts are visible to their
//! author and to nobody else.
//!
//! [`PostFilter::compose`] is the only place feed filters are built; storage
//! backends translate the resulting [`PostFilter`] into their own query
//! language, or evaluate it directly with [`PostFilter::matches`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post, Viewer};

/// Whether `post` is visible to everyone at `now`.
pub fn is_live(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published && post.pub_date <= now && category.is_none_or(|c| c.is_published)
}

/// Whether `viewer` may see `post` at `now`.
pub fn can_view(
    viewer: &Viewer,
    post: &Post,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> bool {
    viewer.is(post.author_id) || is_live(post, category, now)
}

/// The feed a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Category(Uuid),
    Profile(Uuid),
}

/// Which posts survive the visibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// No visibility restriction.
    All,
    /// Only posts live at the given instant.
    LiveAt(DateTime<Utc>),
}

/// A storage-independent description of a feed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub visibility: Visibility,
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

impl PostFilter {
    /// Build the filter for `viewer` looking at `scope`.
    ///
    /// The author's own profile is the one scope that lifts the live-only
    /// restriction; every other combination sees live posts only.
    pub fn compose(viewer: &Viewer, scope: Scope, now: DateTime<Utc>) -> Self {
        let live = Visibility::LiveAt(now);
        match scope {
            Scope::Global => Self {
                visibility: live,
                author_id: None,
                category_id: None,
            },
            Scope::Category(category_id) => Self {
                visibility: live,
                author_id: None,
                category_id: Some(category_id),
            },
            Scope::Profile(author_id) => Self {
                visibility: if viewer.is(author_id) {
                    Visibility::All
                } else {
                    live
                },
                author_id: Some(author_id),
                category_id: None,
            },
        }
    }

    /// Evaluate the filter against one post and its resolved category.
    pub fn matches(&self, post: &Post, category: Option<&Category>) -> bool {
        if self.author_id.is_some_and(|id| id != post.author_id) {
            return false;
        }
        if self.category_id.is_some() && self.category_id != post.category_id {
            return false;
        }
        match self.visibility {
            Visibility::All => true,
            Visibility::LiveAt(now) => is_live(post, category, now),
        }
    }
}

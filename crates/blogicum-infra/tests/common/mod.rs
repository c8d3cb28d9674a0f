//! Shared fixture: services wired to an in-memory store and a frozen clock.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use blogicum_core::domain::{
    Category, CategoryContent, Comment, Post, PostContent, User, Viewer,
};
use blogicum_core::ports::{Clock, Repositories};
use blogicum_core::services::{CommentService, FeedService, PostService};
use blogicum_infra::InMemoryStore;

pub const PAGE_SIZE: u64 = 10;

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub struct Blog {
    pub repos: Repositories,
    pub feed: FeedService,
    pub posts: PostService,
    pub comments: CommentService,
    comment_seq: AtomicI64,
}

impl Blog {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let repos = store.repositories();
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));

        Self {
            feed: FeedService::new(repos.clone(), clock.clone(), PAGE_SIZE),
            posts: PostService::new(repos.clone()),
            comments: CommentService::new(repos.clone(), clock),
            repos,
            comment_seq: AtomicI64::new(0),
        }
    }

    pub async fn user(&self, username: &str) -> (User, Viewer) {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
        );
        let user = self.repos.users.save(user).await.unwrap();
        let viewer = Viewer::user(user.id, &user.username);
        (user, viewer)
    }

    pub async fn category(&self, slug: &str, is_published: bool) -> Category {
        let category = Category::new(CategoryContent {
            title: slug.to_uppercase(),
            description: format!("All about {slug}"),
            slug: slug.to_string(),
            is_published,
        });
        self.repos.categories.save(category).await.unwrap()
    }

    /// Insert a post directly, bypassing the service layer.
    pub async fn post(
        &self,
        author: &User,
        title: &str,
        pub_date: DateTime<Utc>,
        is_published: bool,
        category_id: Option<Uuid>,
    ) -> Post {
        let post = Post::new(author.id, content(title, pub_date, is_published, category_id));
        self.repos.posts.save(post).await.unwrap()
    }

    pub async fn comment(&self, post: &Post, author: &User, text: &str) -> Comment {
        // One minute apart so creation order is unambiguous.
        let seq = self.comment_seq.fetch_add(1, Ordering::SeqCst);
        let mut comment = Comment::new(post.id, author.id, text.to_string());
        comment.created_at = yesterday() + Duration::minutes(seq);
        self.repos.comments.save(comment).await.unwrap()
    }
}

pub fn content(
    title: &str,
    pub_date: DateTime<Utc>,
    is_published: bool,
    category_id: Option<Uuid>,
) -> PostContent {
    PostContent {
        title: title.to_string(),
        text: format!("{title} body"),
        image: None,
        pub_date,
        location_id: None,
        category_id,
        is_published,
    }
}

pub fn yesterday() -> DateTime<Utc> {
    now() - Duration::days(1)
}

pub fn tomorrow() -> DateTime<Utc> {
    now() + Duration::days(1)
}

pub fn titles<'a>(entries: impl IntoIterator<Item = &'a blogicum_core::domain::PostEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.post.title.clone()).collect()
}

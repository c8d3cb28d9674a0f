//! Read models handed to the rendering layer.

use serde::Serialize;

use super::{Category, Comment, Location, Post};

/// A post as it appears in a feed: joined with its author, category and
/// location, and annotated with the number of comments.
#[derive(Debug, Clone, Serialize)]
pub struct PostEntry {
    pub post: Post,
    pub author_username: String,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub comment_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    pub comment: Comment,
    pub author_username: String,
}

/// A single post with its comments, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub entry: PostEntry,
    pub comments: Vec<CommentEntry>,
}

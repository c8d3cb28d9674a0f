//! Conversions from domain read models to response DTOs.

use chrono::Utc;

use blogicum_core::domain::{
    Category, Comment, CommentEntry, Location, Page, PostContent, PostDetail, PostEntry, User,
};
use blogicum_shared::dto::{
    CategoryResponse, CommentResponse, LocationResponse, PageResponse, PostDetailResponse,
    PostRequest, PostResponse, ProfileResponse, UserResponse,
};

pub fn page<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let page = page.map(f);
    PageResponse {
        items: page.items,
        page: page.number,
        page_size: page.size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}

pub fn post(entry: PostEntry) -> PostResponse {
    let PostEntry {
        post,
        author_username,
        category,
        location,
        comment_count,
    } = entry;

    PostResponse {
        id: post.id,
        title: post.title,
        text: post.text,
        image: post.image,
        pub_date: post.pub_date,
        is_published: post.is_published,
        created_at: post.created_at,
        author: author_username,
        category: category.map(self::category),
        location: location.map(self::location),
        comment_count,
    }
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post(detail.entry),
        comments: detail.comments.into_iter().map(comment_entry).collect(),
    }
}

pub fn comment_entry(entry: CommentEntry) -> CommentResponse {
    comment(entry.comment, entry.author_username)
}

pub fn comment(comment: Comment, author: String) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        text: comment.text,
        author,
        created_at: comment.created_at,
    }
}

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
        is_published: category.is_published,
    }
}

pub fn location(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
        is_published: location.is_published,
    }
}

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        is_admin: user.is_admin,
        created_at: user.created_at,
    }
}

/// Public profile; the email address is left out.
pub fn profile(user: User) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        created_at: user.created_at,
    }
}

/// A request without `pub_date` is published as of now.
pub fn post_content(req: PostRequest) -> PostContent {
    PostContent {
        title: req.title,
        text: req.text,
        image: req.image,
        pub_date: req.pub_date.unwrap_or_else(Utc::now),
        location_id: req.location_id,
        category_id: req.category_id,
        is_published: req.is_published,
    }
}

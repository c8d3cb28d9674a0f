//! Post and comment mutation rules over the in-memory store.

mod common;

use uuid::Uuid;

use blogicum_core::DomainError;
use blogicum_core::domain::Viewer;
use common::{Blog, content, tomorrow, yesterday};

#[tokio::test]
async fn test_create_post_requires_login() {
    let blog = Blog::new();
    let result = blog
        .posts
        .create(&Viewer::Anonymous, content("Hello", yesterday(), true, None))
        .await;

    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_create_post_sets_author_and_rejects_unknown_category() {
    let blog = Blog::new();
    let (ann, ann_viewer) = blog.user("ann").await;

    let post = blog
        .posts
        .create(&ann_viewer, content("Hello", yesterday(), true, None))
        .await
        .unwrap();
    assert_eq!(post.author_id, ann.id);

    let result = blog
        .posts
        .create(&ann_viewer, content("Lost", yesterday(), true, Some(Uuid::new_v4())))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_create_post_rejects_blank_title() {
    let blog = Blog::new();
    let (_, ann_viewer) = blog.user("ann").await;

    let result = blog
        .posts
        .create(&ann_viewer, content("   ", yesterday(), true, None))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_non_author_cannot_edit_or_delete_post() {
    let blog = Blog::new();
    let (ann, _) = blog.user("ann").await;
    let (_, bob_viewer) = blog.user("bob").await;
    let post = blog.post(&ann, "Mine", yesterday(), true, None).await;

    let edit = blog
        .posts
        .update(&bob_viewer, post.id, content("Yours", yesterday(), true, None))
        .await;
    assert!(matches!(edit, Err(DomainError::NotAuthor { post_id }) if post_id == post.id));

    let delete = blog.posts.delete(&Viewer::Anonymous, post.id).await;
    assert!(matches!(delete, Err(DomainError::NotAuthor { .. })));

    let kept = blog.feed.get_post(&Viewer::Anonymous, post.id).await.unwrap();
    assert_eq!(kept.entry.post.title, "Mine");
}

#[tokio::test]
async fn test_author_can_reschedule_post() {
    let blog = Blog::new();
    let (ann, ann_viewer) = blog.user("ann").await;
    let post = blog.post(&ann, "Now", yesterday(), true, None).await;

    blog.posts
        .update(&ann_viewer, post.id, content("Later", tomorrow(), true, None))
        .await
        .unwrap();

    assert!(blog.feed.list_feed(&Viewer::Anonymous, 1).await.unwrap().items.is_empty());
    let own = blog.feed.get_post(&ann_viewer, post.id).await.unwrap();
    assert_eq!(own.entry.post.title, "Later");
}

#[tokio::test]
async fn test_delete_post_removes_comments() {
    let blog = Blog::new();
    let (ann, ann_viewer) = blog.user("ann").await;
    let (bob, _) = blog.user("bob").await;
    let post = blog.post(&ann, "Doomed", yesterday(), true, None).await;
    let comment = blog.comment(&post, &bob, "Nice").await;

    blog.posts.delete(&ann_viewer, post.id).await.unwrap();

    assert!(blog.repos.comments.find_by_id(comment.id).await.unwrap().is_none());
    let gone = blog.feed.get_post(&ann_viewer, post.id).await;
    assert!(matches!(gone, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_comment_on_hidden_post_is_not_found() {
    let blog = Blog::new();
    let (ann, ann_viewer) = blog.user("ann").await;
    let (_, bob_viewer) = blog.user("bob").await;
    let draft = blog.post(&ann, "Draft", yesterday(), false, None).await;

    let result = blog
        .comments
        .create(&bob_viewer, draft.id, "Hello?".to_string())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));

    // The author may still leave notes on their own draft.
    let note = blog
        .comments
        .create(&ann_viewer, draft.id, "Finish this".to_string())
        .await
        .unwrap();
    assert_eq!(note.post_id, draft.id);
}

#[tokio::test]
async fn test_comment_requires_login() {
    let blog = Blog::new();
    let (ann, _) = blog.user("ann").await;
    let post = blog.post(&ann, "Open", yesterday(), true, None).await;

    let result = blog
        .comments
        .create(&Viewer::Anonymous, post.id, "Hi".to_string())
        .await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_comment_mutation_is_author_only() {
    let blog = Blog::new();
    let (ann, ann_viewer) = blog.user("ann").await;
    let (bob, bob_viewer) = blog.user("bob").await;
    let post = blog.post(&ann, "Open", yesterday(), true, None).await;
    let comment = blog.comment(&post, &bob, "Hi").await;

    // Owning the post does not grant rights over other people's comments.
    let edit = blog
        .comments
        .update(&ann_viewer, post.id, comment.id, "Bye".to_string())
        .await;
    assert!(matches!(edit, Err(DomainError::NotAuthor { post_id }) if post_id == post.id));

    let edited = blog
        .comments
        .update(&bob_viewer, post.id, comment.id, "Hello".to_string())
        .await
        .unwrap();
    assert_eq!(edited.text, "Hello");

    blog.comments
        .delete(&bob_viewer, post.id, comment.id)
        .await
        .unwrap();
    let detail = blog.feed.get_post(&Viewer::Anonymous, post.id).await.unwrap();
    assert_eq!(detail.entry.comment_count, 0);
}

#[tokio::test]
async fn test_comment_addressed_through_wrong_post_is_not_found() {
    let blog = Blog::new();
    let (ann, _) = blog.user("ann").await;
    let (bob, bob_viewer) = blog.user("bob").await;
    let first = blog.post(&ann, "First", yesterday(), true, None).await;
    let second = blog.post(&ann, "Second", yesterday(), true, None).await;
    let comment = blog.comment(&first, &bob, "Hi").await;

    let result = blog
        .comments
        .delete(&bob_viewer, second.id, comment.id)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { entity_type: "Comment", .. })));
}

#[tokio::test]
async fn test_comment_text_length_is_limited() {
    let blog = Blog::new();
    let (ann, ann_viewer) = blog.user("ann").await;
    let post = blog.post(&ann, "Open", yesterday(), true, None).await;

    let result = blog
        .comments
        .create(&ann_viewer, post.id, "x".repeat(257))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait, Value};
use uuid::Uuid;

use blogicum_core::domain::{Category, PageRequest, Post, Viewer};
use blogicum_core::policy::{PostFilter, Scope};
use blogicum_core::ports::{BaseRepository, CategoryRepository, CommentRepository, PostRepository};

use crate::database::entity::{category, comment, post, user};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    filtered_posts,
};

fn post_model(id: Uuid, author_id: Uuid) -> post::Model {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    post::Model {
        id,
        author_id,
        title: "Test Post".to_owned(),
        text: "Content".to_owned(),
        image: None,
        pub_date: at.into(),
        location_id: None,
        category_id: None,
        is_published: true,
        created_at: at.into(),
    }
}

fn user_model(id: Uuid, username: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        password_hash: "hash".to_owned(),
        is_admin: false,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(post_id: Uuid, count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("post_id", Value::from(post_id)),
        ("comment_count", Value::from(count)),
    ])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_entry_annotates_author_and_comment_count() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id)]])
        .append_query_results([vec![user_model(author_id, "ann")]])
        .append_query_results([vec![count_row(post_id, 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let entry = repo.find_entry(post_id).await.unwrap().unwrap();

    assert_eq!(entry.author_username, "ann");
    assert_eq!(entry.comment_count, 3);
    assert!(entry.category.is_none());
}

#[tokio::test]
async fn test_find_page_counts_and_defaults_missing_comment_count() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let total = BTreeMap::from([("num_items", Value::from(11i64))]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![total]])
        .append_query_results([vec![post_model(post_id, author_id)]])
        .append_query_results([vec![user_model(author_id, "ann")]])
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let filter = PostFilter::compose(&Viewer::Anonymous, Scope::Global, Utc::now());
    let page = repo
        .find_page(&filter, PageRequest::new(2, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_items, 11);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].comment_count, 0);
}

#[test]
fn test_live_filter_keeps_uncategorized_posts() {
    let filter = PostFilter::compose(&Viewer::Anonymous, Scope::Global, Utc::now());
    let sql = filtered_posts(&filter)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains("LEFT JOIN \"categories\""));
    assert!(sql.contains("\"posts\".\"category_id\" IS NULL"));
    assert!(sql.contains("\"categories\".\"is_published\" = TRUE"));
    assert!(sql.contains("\"posts\".\"pub_date\" <="));
}

#[test]
fn test_owner_profile_filter_has_no_visibility_clause() {
    let author_id = Uuid::new_v4();
    let owner = Viewer::user(author_id, "ann");
    let filter = PostFilter::compose(&owner, Scope::Profile(author_id), Utc::now());
    let sql = filtered_posts(&filter)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains("\"posts\".\"author_id\" ="));
    assert!(!sql.contains("\"is_published\" = TRUE"));
    assert!(!sql.contains("JOIN"));
}

#[tokio::test]
async fn test_find_category_by_slug() {
    let now = Utc::now();
    let id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category::Model {
            id,
            title: "Travel".to_owned(),
            description: "Trips".to_owned(),
            slug: "travel".to_owned(),
            is_published: false,
            created_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let found: Category = repo.find_by_slug("travel").await.unwrap().unwrap();

    assert_eq!(found.id, id);
    assert!(!found.is_published);
}

#[tokio::test]
async fn test_find_comments_joins_author() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![(
            comment::Model {
                id: Uuid::new_v4(),
                post_id,
                author_id,
                text: "First!".to_owned(),
                created_at: now.into(),
            },
            Some(user_model(author_id, "bob")),
        )]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo.find_for_post(post_id).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_username, "bob");
    assert_eq!(comments[0].comment.text, "First!");
}

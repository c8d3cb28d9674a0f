use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use blogicum_core::domain::{Category, CategoryContent, Post, PostContent, User};
use blogicum_core::ports::{PasswordService, TokenService};
use blogicum_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use super::{configure_routes, json_config, query_config};
use crate::state::AppState;

fn tokens() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-tests".to_string(),
        ..JwtConfig::default()
    }))
}

fn passwords() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

macro_rules! app {
    ($state:expr, $tokens:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .app_data(web::Data::new(passwords()))
                .app_data(json_config())
                .app_data(query_config())
                .configure(configure_routes),
        )
        .await
    };
}

async fn seed_user(state: &AppState, username: &str, is_admin: bool) -> User {
    let mut user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        "unused".to_string(),
    );
    user.is_admin = is_admin;
    state.repos.users.save(user).await.unwrap()
}

async fn seed_post(state: &AppState, author: &User, is_published: bool) -> Post {
    let post = Post::new(
        author.id,
        PostContent {
            title: "Hello".to_string(),
            text: "World".to_string(),
            image: None,
            pub_date: Utc::now() - Duration::hours(1),
            location_id: None,
            category_id: None,
            is_published,
        },
    );
    state.repos.posts.save(post).await.unwrap()
}

fn bearer(tokens: &Arc<dyn TokenService>, user: &User) -> (header::HeaderName, String) {
    let token = tokens
        .generate_token(user.id, &user.username, user.roles())
        .unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_health_reports_storage() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let app = app!(state, tokens);

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "abc-123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_hidden_post_is_not_found_except_for_author() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let ann = seed_user(&state, "ann", false).await;
    let draft = seed_post(&state, &ann, false).await;
    let app = app!(state, tokens);

    let uri = format!("/api/posts/{}", draft.id);
    let anonymous = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let own = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&tokens, &ann))
            .to_request(),
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_non_author_edit_redirects_to_post() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let ann = seed_user(&state, "ann", false).await;
    let bob = seed_user(&state, "bob", false).await;
    let post = seed_post(&state, &ann, true).await;
    let app = app!(state, tokens);

    let uri = format!("/api/posts/{}", post.id);
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&tokens, &bob))
        .set_json(json!({"title": "Mine now", "text": "Gotcha"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), uri.as_str());

    let anonymous_delete = test::call_service(
        &app,
        test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(anonymous_delete.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_unpublished_category_is_not_found() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    state
        .repos
        .categories
        .save(Category::new(CategoryContent {
            title: "Hidden".to_string(),
            description: "Nothing to see".to_string(),
            slug: "hidden".to_string(),
            is_published: false,
        }))
        .await
        .unwrap();
    let app = app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/category/hidden").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
}

#[actix_web::test]
async fn test_create_post_requires_token() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let app = app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "Hi", "text": "There"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_invalid_page_is_bad_request() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let app = app!(state, tokens);

    for uri in ["/api/posts?page=0", "/api/posts?page=abc"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn test_page_far_past_the_end_is_empty() {
    let state = AppState::in_memory(10);
    let author = seed_user(&state, "ann", false).await;
    seed_post(&state, &author, true).await;
    let tokens = tokens();
    let app = app!(state, tokens);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts?page={}", u64::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["total_items"], 1);
}

#[actix_web::test]
async fn test_register_login_and_publish() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let app = app!(state, tokens);

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"username": "leo", "email": "leo@example.com", "password": "s3cret-pass"}))
        .to_request();
    let resp = test::call_service(&app, register).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "leo", "password": "s3cret-pass"}))
        .to_request();
    let auth: Value = test::call_and_read_body_json(&app, login).await;
    let token = auth["access_token"].as_str().unwrap().to_string();

    let create = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"title": "First", "text": "Hello, world"}))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["author"], "leo");

    let feed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/posts").to_request(),
    )
    .await;
    assert_eq!(feed["total_items"], 1);
    assert_eq!(feed["items"][0]["title"], "First");
    assert_eq!(feed["items"][0]["comment_count"], 0);
}

#[actix_web::test]
async fn test_register_rejects_bad_input_and_duplicates() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    seed_user(&state, "ann", false).await;
    let app = app!(state, tokens);

    let invalid = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"username": "no spaces", "email": "nope", "password": "short"}))
        .to_request();
    let resp = test::call_service(&app, invalid).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let taken = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"username": "ann", "email": "other@example.com", "password": "long-enough"}))
        .to_request();
    let resp = test::call_service(&app, taken).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_admin_routes_require_admin_role() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let writer = seed_user(&state, "writer", false).await;
    let admin = seed_user(&state, "root", true).await;
    let app = app!(state, tokens);

    let body = json!({"title": "Travel", "description": "Trips", "slug": "travel"});

    let denied = test::TestRequest::post()
        .uri("/api/admin/categories")
        .insert_header(bearer(&tokens, &writer))
        .set_json(&body)
        .to_request();
    assert_eq!(
        test::call_service(&app, denied).await.status(),
        StatusCode::FORBIDDEN
    );

    let allowed = test::TestRequest::post()
        .uri("/api/admin/categories")
        .insert_header(bearer(&tokens, &admin))
        .set_json(&body)
        .to_request();
    assert_eq!(
        test::call_service(&app, allowed).await.status(),
        StatusCode::CREATED
    );

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/categories").to_request(),
    )
    .await;
    assert_eq!(listed[0]["slug"], "travel");
}

#[actix_web::test]
async fn test_comment_thread() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let ann = seed_user(&state, "ann", false).await;
    let bob = seed_user(&state, "bob", false).await;
    let post = seed_post(&state, &ann, true).await;
    let app = app!(state, tokens);

    let add = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(bearer(&tokens, &bob))
        .set_json(json!({"text": "Nice post"}))
        .to_request();
    let resp = test::call_service(&app, add).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(resp).await;
    let comment_id = comment["id"].as_str().unwrap().to_string();

    let detail: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/posts/{}", post.id))
            .to_request(),
    )
    .await;
    assert_eq!(detail["comment_count"], 1);
    assert_eq!(detail["comments"][0]["author"], "bob");

    // The post author cannot remove someone else's comment.
    let delete = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/comments/{}", post.id, comment_id))
        .insert_header(bearer(&tokens, &ann))
        .to_request();
    assert_eq!(
        test::call_service(&app, delete).await.status(),
        StatusCode::SEE_OTHER
    );
}

#[actix_web::test]
async fn test_profile_feed_shows_drafts_to_owner_only() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let ann = seed_user(&state, "ann", false).await;
    seed_post(&state, &ann, false).await;
    let app = app!(state, tokens);

    let public: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/profile/ann").to_request(),
    )
    .await;
    assert_eq!(public["posts"]["total_items"], 0);
    assert!(public["profile"].get("email").is_none());

    let own: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/profile/ann")
            .insert_header(bearer(&tokens, &ann))
            .to_request(),
    )
    .await;
    assert_eq!(own["posts"]["total_items"], 1);

    let missing = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/profile/ghost").to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_configured_admins_are_promoted() {
    let state = AppState::in_memory(10).with_admins(vec!["root".to_string(), "chief".to_string()]);
    let tokens = tokens();
    let chief = User::new(
        "chief".to_string(),
        "chief@example.com".to_string(),
        passwords().hash("long-enough").unwrap(),
    );
    let chief = state.repos.users.save(chief).await.unwrap();
    let app = app!(state, tokens);

    let register = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"username": "root", "email": "root@example.com", "password": "long-enough"}))
        .to_request();
    let auth: Value = test::call_and_read_body_json(&app, register).await;
    let token = auth["access_token"].as_str().unwrap();

    let create = test::TestRequest::post()
        .uri("/api/admin/locations")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({"name": "Island"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, create).await.status(),
        StatusCode::CREATED
    );

    let login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "chief", "password": "long-enough"}))
        .to_request();
    assert_eq!(test::call_service(&app, login).await.status(), StatusCode::OK);
    let stored = state.repos.users.find_by_id(chief.id).await.unwrap().unwrap();
    assert!(stored.is_admin);
}

#[actix_web::test]
async fn test_demoted_admin_loses_access_with_old_token() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let mut admin = seed_user(&state, "root", true).await;
    let stale = bearer(&tokens, &admin);
    admin.is_admin = false;
    state.repos.users.save(admin).await.unwrap();
    let app = app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/admin/categories")
        .insert_header(stale)
        .set_json(json!({"title": "Travel", "description": "Trips", "slug": "travel"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_comment_author_follows_profile_rename() {
    let state = AppState::in_memory(10);
    let tokens = tokens();
    let ann = seed_user(&state, "ann", false).await;
    let bob = seed_user(&state, "bob", false).await;
    let post = seed_post(&state, &ann, true).await;
    let app = app!(state, tokens);

    let rename = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header(bearer(&tokens, &bob))
        .set_json(json!({
            "first_name": "Rob",
            "last_name": "",
            "username": "robert",
            "email": "bob@example.com"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, rename).await.status(), StatusCode::OK);

    let add = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header(bearer(&tokens, &bob))
        .set_json(json!({"text": "Renamed"}))
        .to_request();
    let resp = test::call_service(&app, add).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(resp).await;
    assert_eq!(comment["author"], "robert");
}

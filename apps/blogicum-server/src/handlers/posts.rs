//! Post handlers: the main feed, post detail, and authoring.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_shared::dto::{PageQuery, PostRequest};

use super::presenters;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?page=N
pub async fn list_feed(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .feed
        .list_feed(&identity.viewer(), query.page.unwrap_or(1))
        .await?;

    Ok(HttpResponse::Ok().json(presenters::page(page, presenters::post)))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.feed.get_post(&identity.viewer(), *path).await?;
    Ok(HttpResponse::Ok().json(presenters::post_detail(detail)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let post = state
        .posts
        .create(&viewer, presenters::post_content(body.into_inner()))
        .await?;

    let detail = state.feed.get_post(&viewer, post.id).await?;
    Ok(HttpResponse::Created().json(presenters::post_detail(detail)))
}

/// PUT /api/posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let viewer = identity.viewer();
    let post = state
        .posts
        .update(&viewer, *path, presenters::post_content(body.into_inner()))
        .await?;

    let detail = state.feed.get_post(&viewer, post.id).await?;
    Ok(HttpResponse::Ok().json(presenters::post_detail(detail)))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&identity.viewer(), *path).await?;
    Ok(HttpResponse::NoContent().finish())
}

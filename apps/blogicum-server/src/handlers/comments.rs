//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::domain::Comment;
use blogicum_core::error::DomainError;
use blogicum_shared::dto::{CommentRequest, CommentResponse};

use super::presenters;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Render a comment under its author's current username.
async fn present(state: &AppState, comment: Comment) -> AppResult<CommentResponse> {
    let author = state
        .repos
        .users
        .find_by_id(comment.author_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", comment.author_id))?;

    Ok(presenters::comment(comment, author.username))
}

/// POST /api/posts/{post_id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .create(&identity.viewer(), *path, body.into_inner().text)
        .await?;

    Ok(HttpResponse::Created().json(present(&state, comment).await?))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .comments
        .update(&identity.viewer(), post_id, comment_id, body.into_inner().text)
        .await?;

    Ok(HttpResponse::Ok().json(present(&state, comment).await?))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .comments
        .delete(&identity.viewer(), post_id, comment_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

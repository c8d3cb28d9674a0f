//! Category and profile pages.

use actix_web::{HttpResponse, web};

use blogicum_shared::dto::{CategoryFeedResponse, PageQuery, ProfileFeedResponse};

use super::presenters;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/category/{slug}?page=N
pub async fn category_feed(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feed
        .list_category(&identity.viewer(), &path, query.page.unwrap_or(1))
        .await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: presenters::category(feed.category),
        posts: presenters::page(feed.posts, presenters::post),
    }))
}

/// GET /api/profile/{username}?page=N
pub async fn profile_feed(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let feed = state
        .feed
        .list_profile(&identity.viewer(), &path, query.page.unwrap_or(1))
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: presenters::profile(feed.profile),
        posts: presenters::page(feed.posts, presenters::post),
    }))
}

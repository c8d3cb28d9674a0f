//! Categories and locations: public choice lists and admin management.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::domain::{Category, CategoryContent, Location, LocationContent};
use blogicum_core::error::DomainError;
use blogicum_shared::dto::{CategoryRequest, LocationRequest};

use super::presenters;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.repos.categories.list_published().await?;
    let body: Vec<_> = categories.into_iter().map(presenters::category).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/locations
pub async fn list_locations(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let locations = state.repos.locations.list_published().await?;
    let body: Vec<_> = locations.into_iter().map(presenters::location).collect();
    Ok(HttpResponse::Ok().json(body))
}

fn category_content(req: CategoryRequest) -> CategoryContent {
    CategoryContent {
        title: req.title,
        description: req.description,
        slug: req.slug,
        is_published: req.is_published,
    }
}

/// Admin rights come from the stored account so that a promotion or demotion
/// applies without a fresh token.
async fn require_admin(state: &AppState, identity: &Identity) -> AppResult<()> {
    let user = state
        .repos
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if user.is_admin {
        Ok(())
    } else {
        tracing::warn!(user_id = %identity.user_id, "Admin route denied");
        Err(AppError::Forbidden)
    }
}

/// Reject a slug already used by a category other than `current`.
async fn ensure_slug_free(state: &AppState, slug: &str, current: Option<Uuid>) -> AppResult<()> {
    match state.repos.categories.find_by_slug(slug).await? {
        Some(existing) if Some(existing.id) != current => Err(AppError::Conflict(format!(
            "Category slug '{}' is already in use",
            slug
        ))),
        _ => Ok(()),
    }
}

/// POST /api/admin/categories
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;
    let content = category_content(body.into_inner());
    content.validate()?;
    ensure_slug_free(&state, &content.slug, None).await?;

    let category = state.repos.categories.save(Category::new(content)).await?;
    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

    Ok(HttpResponse::Created().json(presenters::category(category)))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;
    let id = *path;
    let mut category = state
        .repos
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Category", id))?;

    let content = category_content(body.into_inner());
    content.validate()?;
    ensure_slug_free(&state, &content.slug, Some(id)).await?;

    category.apply(content);
    let category = state.repos.categories.save(category).await?;
    tracing::info!(category_id = %id, published = category.is_published, "Category updated");

    Ok(HttpResponse::Ok().json(presenters::category(category)))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;
    let id = *path;
    if state.repos.categories.find_by_id(id).await?.is_none() {
        return Err(DomainError::not_found("Category", id).into());
    }

    state.repos.categories.delete(id).await?;
    tracing::info!(category_id = %id, "Category deleted");
    Ok(HttpResponse::NoContent().finish())
}

fn location_content(req: LocationRequest) -> LocationContent {
    LocationContent {
        name: req.name,
        is_published: req.is_published,
    }
}

/// POST /api/admin/locations
pub async fn create_location(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<LocationRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;
    let content = location_content(body.into_inner());
    content.validate()?;

    let location = state.repos.locations.save(Location::new(content)).await?;
    tracing::info!(location_id = %location.id, "Location created");

    Ok(HttpResponse::Created().json(presenters::location(location)))
}

/// PUT /api/admin/locations/{id}
pub async fn update_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<LocationRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;
    let id = *path;
    let mut location = state
        .repos
        .locations
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Location", id))?;

    let content = location_content(body.into_inner());
    content.validate()?;

    location.apply(content);
    let location = state.repos.locations.save(location).await?;
    Ok(HttpResponse::Ok().json(presenters::location(location)))
}

/// DELETE /api/admin/locations/{id}
pub async fn delete_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &identity).await?;
    let id = *path;
    if state.repos.locations.find_by_id(id).await?.is_none() {
        return Err(DomainError::not_found("Location", id).into());
    }

    state.repos.locations.delete(id).await?;
    tracing::info!(location_id = %id, "Location deleted");
    Ok(HttpResponse::NoContent().finish())
}

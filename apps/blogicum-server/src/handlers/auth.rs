//! Account handlers: registration, login, the current user and profile edits.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use blogicum_core::domain::{ProfileChanges, User, validate_email, validate_username};
use blogicum_core::error::DomainError;
use blogicum_core::ports::{PasswordService, TokenService};
use blogicum_shared::dto::{AuthResponse, LoginRequest, ProfileUpdateRequest, RegisterRequest};

use super::presenters;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

fn validation_message(result: Result<(), DomainError>) -> Option<String> {
    match result {
        Err(DomainError::Validation(msg)) => Some(msg),
        Err(other) => Some(other.to_string()),
        Ok(()) => None,
    }
}

fn issue_token(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let access_token = token_service.generate_token(user.id, &user.username, user.roles())?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors: Vec<String> = [
        validation_message(validate_username(&req.username)),
        validation_message(validate_email(&req.email)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.repos.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }
    if state.repos.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service.hash(&req.password)?;
    let mut user = User::new(req.username, req.email, password_hash);
    user.is_admin = state.is_configured_admin(&user.username);
    let user = state.repos.users.save(user).await?;
    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        is_admin = user.is_admin,
        "User registered"
    );

    Ok(HttpResponse::Created().json(issue_token(&**token_service.get_ref(), &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut user = state
        .repos
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !password_service.verify(&req.password, &user.password_hash)? {
        tracing::warn!(username = %req.username, "Failed login attempt");
        return Err(AppError::Unauthorized);
    }

    if !user.is_admin && state.is_configured_admin(&user.username) {
        user.is_admin = true;
        user = state.repos.users.save(user).await?;
        tracing::info!(user_id = %user.id, "User promoted to administrator");
    }

    Ok(HttpResponse::Ok().json(issue_token(&**token_service.get_ref(), &user)?))
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .repos
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", identity.user_id))?;

    Ok(HttpResponse::Ok().json(presenters::user(user)))
}

/// PUT /api/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileUpdateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let users = &state.repos.users;

    let mut user = users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", identity.user_id))?;

    if let Some(other) = users.find_by_username(&req.username).await? {
        if other.id != user.id {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
    }
    if let Some(other) = users.find_by_email(&req.email).await? {
        if other.id != user.id {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
    }

    user.apply_profile(ProfileChanges {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username,
        email: req.email,
    })?;
    let user = users.save(user).await?;
    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(HttpResponse::Ok().json(presenters::user(user)))
}

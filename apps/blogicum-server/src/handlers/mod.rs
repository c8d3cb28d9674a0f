//! HTTP handlers and route configuration.

mod auth;
mod catalog;
mod comments;
mod feeds;
mod health;
mod posts;
mod presenters;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Malformed JSON bodies become RFC 7807 400 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Malformed query strings (`?page=abc`) become RFC 7807 400 responses.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/categories", web::get().to(catalog::list_categories))
            .route("/locations", web::get().to(catalog::list_locations))
            .route("/category/{slug}", web::get().to(feeds::category_feed))
            .route("/profile/{username}", web::get().to(feeds::profile_feed))
            .route("/profile", web::put().to(auth::update_profile))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_feed))
                    .route("", web::post().to(posts::create_post))
                    .route("/{post_id}", web::get().to(posts::get_post))
                    .route("/{post_id}", web::put().to(posts::update_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post))
                    .route("/{post_id}/comments", web::post().to(comments::add_comment))
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::put().to(comments::update_comment),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::delete().to(comments::delete_comment),
                    ),
            )
            // Administration
            .service(
                web::scope("/admin")
                    .route("/categories", web::post().to(catalog::create_category))
                    .route("/categories/{id}", web::put().to(catalog::update_category))
                    .route("/categories/{id}", web::delete().to(catalog::delete_category))
                    .route("/locations", web::post().to(catalog::create_location))
                    .route("/locations/{id}", web::put().to(catalog::update_location))
                    .route("/locations/{id}", web::delete().to(catalog::delete_location)),
            ),
    );
}

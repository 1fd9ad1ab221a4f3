//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod blog;
mod generate;
mod health;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use actix_web::http::Method;
use actix_web::web;

use vinculo_core::ports::RateLimiter;

use crate::middleware::rate_limit::RateLimitMiddleware;

pub use blog::CONTENT_SOURCE_HEADER;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Option<Arc<dyn RateLimiter>>) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Public site
            .route("/blog", web::get().to(blog::list))
            .route("/blog/{slug}", web::get().to(blog::show))
            .route("/categories", web::get().to(blog::categories))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/session", web::get().to(auth::session)),
            )
            .service(
                web::scope("/admin")
                    .route("/dashboard", web::get().to(admin::dashboard))
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(admin::list_posts))
                            .route(web::post().to(admin::create_post)),
                    )
                    .service(
                        web::resource("/posts/{id}")
                            .route(web::get().to(admin::get_post))
                            .route(web::patch().to(admin::update_post))
                            .route(web::delete().to(admin::delete_post)),
                    )
                    .route("/posts/{id}/publish", web::post().to(admin::publish_post))
                    .route("/posts/{id}/unpublish", web::post().to(admin::unpublish_post))
                    .route("/posts/{id}/archive", web::post().to(admin::archive_post))
                    .route("/posts/{id}/featured", web::put().to(admin::set_featured)),
            ),
    );

    let generate_resource = || {
        web::resource("/generate-blog-content")
            .route(web::post().to(generate::generate))
            .route(web::method(Method::OPTIONS).to(generate::preflight))
    };

    match limiter {
        Some(limiter) => cfg.service(
            web::scope("/functions/v1")
                .wrap(RateLimitMiddleware::new(limiter))
                .wrap(generate::cors_headers())
                .service(generate_resource()),
        ),
        None => cfg.service(
            web::scope("/functions/v1")
                .wrap(generate::cors_headers())
                .service(generate_resource()),
        ),
    };
}

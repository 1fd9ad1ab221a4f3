//! Public blog endpoints. Always answer, from the bundled posts if needed.

use actix_web::{HttpResponse, HttpResponseBuilder, web};

use vinculo_core::domain::seed_categories;
use vinculo_core::services::{BlogContext, ContentOrigin};
use vinculo_shared::dto::{BlogListQuery, BlogListResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

fn with_origin(mut builder: HttpResponseBuilder, origin: ContentOrigin) -> HttpResponseBuilder {
    if origin == ContentOrigin::Fallback {
        builder.insert_header((CONTENT_SOURCE_HEADER, "fallback"));
    }
    builder
}

/// GET /api/blog?q=&category=&lang=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<BlogListQuery>,
) -> HttpResponse {
    let query = query.into_inner();
    let language = query.lang.unwrap_or_default();

    let mut context = BlogContext::new();
    context.refresh(&state.catalog).await;
    if let Some(q) = query.q {
        context.set_search(q);
    }
    if let Some(category) = query.category {
        context.set_category(category);
    }

    let origin = context
        .state()
        .view()
        .map(|v| v.origin)
        .unwrap_or(ContentOrigin::Fallback);

    let body = BlogListResponse {
        posts: context.visible_posts(language).into_iter().cloned().collect(),
        featured: context.featured().cloned(),
        degraded: context.is_degraded(),
    };

    with_origin(HttpResponse::Ok(), origin).json(body)
}

/// GET /api/blog/{slug}
pub async fn show(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let (post, origin) = state.catalog.find(&slug).await;

    match post {
        Some(post) => Ok(with_origin(HttpResponse::Ok(), origin).json(post)),
        None => Err(AppError::NotFound(format!("post '{}' not found", slug))),
    }
}

/// GET /api/categories
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    match state.blog.list_categories().await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(e) => {
            tracing::error!(error = %e, "Category lookup failed, serving seeded list");
            with_origin(HttpResponse::Ok(), ContentOrigin::Fallback).json(seed_categories())
        }
    }
}

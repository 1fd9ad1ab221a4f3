//! Admin panel endpoints. Every handler requires an `AdminSession`.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use vinculo_core::domain::slug::is_valid_slug;
use vinculo_core::domain::validation::validate_new_post;
use vinculo_core::domain::{NewPost, PostUpdate};
use vinculo_core::services::search_posts;
use vinculo_shared::dto::{AdminPostsQuery, DashboardResponse, ToggleFeaturedRequest};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const RECENT_POSTS: usize = 5;

/// GET /api/admin/dashboard
pub async fn dashboard(state: web::Data<AppState>, _admin: AdminSession) -> AppResult<HttpResponse> {
    let (stats, recent_posts) = futures::try_join!(
        state.blog.get_stats(),
        state.blog.get_recent_posts(RECENT_POSTS)
    )?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        stats,
        recent_posts,
    }))
}

/// GET /api/admin/posts?q=&status=&lang=
pub async fn list_posts(
    state: web::Data<AppState>,
    _admin: AdminSession,
    query: web::Query<AdminPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let mut posts = state.blog.get_all_posts().await?;

    if let Some(status) = query.status {
        posts.retain(|p| p.status == status);
    }
    if let Some(q) = query.q.as_deref() {
        posts = search_posts(&posts, q, query.lang.unwrap_or_default());
    }

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    admin: AdminSession,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    validate_new_post(&draft).map_err(AppError::Validation)?;

    let post = state.blog.create_post(draft).await?;
    tracing::info!(post_id = %post.id, by = %admin.session().user_id, "Draft saved");

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/admin/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .blog
        .get_post_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post '{}' not found", id)))?;

    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /api/admin/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    admin: AdminSession,
    path: web::Path<Uuid>,
    body: web::Json<PostUpdate>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let changes = body.into_inner();

    if let Some(slug) = changes.slug.as_deref() {
        if !is_valid_slug(slug) {
            return Err(AppError::Validation(vec![format!(
                "slug '{}' must be lowercase letters, digits and single dashes",
                slug
            )]));
        }
    }
    if changes.categories.as_ref().is_some_and(Vec::is_empty) {
        return Err(AppError::Validation(vec![
            "at least one category is required".to_string(),
        ]));
    }

    let post = state.blog.update_post(id, changes).await?;
    tracing::info!(post_id = %id, by = %admin.session().user_id, "Post saved");

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.blog.delete_post(id).await?;
    tracing::info!(post_id = %id, by = %admin.session().user_id, "Post removed");

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/admin/posts/{id}/publish
pub async fn publish_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.publish_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/admin/posts/{id}/unpublish
pub async fn unpublish_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.unpublish_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/admin/posts/{id}/archive
pub async fn archive_post(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.blog.archive_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/admin/posts/{id}/featured
pub async fn set_featured(
    state: web::Data<AppState>,
    _admin: AdminSession,
    path: web::Path<Uuid>,
    body: web::Json<ToggleFeaturedRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .toggle_featured(path.into_inner(), body.featured)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

//! Admin sign-in handlers.

use actix_web::{HttpResponse, web};

use vinculo_core::domain::{AdminRole, Session};
use vinculo_core::ports::{AuthError, BaseRepository};
use vinculo_shared::dto::{AuthResponse, LoginRequest, SessionResponse};

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn session_response(session: &Session, role: AdminRole) -> SessionResponse {
    SessionResponse {
        user_id: session.user_id,
        email: session.email.clone(),
        role,
    }
}

/// POST /api/auth/login
///
/// Valid credentials without an admin profile get a 403 and no token.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Sign-in rejected: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let Some(profile) = state.profiles.find_by_id(user.id).await? else {
        tracing::warn!(user_id = %user.id, "Sign-in rejected: no admin profile");
        return Err(AuthError::NoAdminProfile.into());
    };

    let role = profile.role;
    let session = Session {
        user_id: user.id,
        email: user.email,
        profile: Some(profile),
    };

    let token = state
        .tokens
        .generate_token(session.user_id, &session.email, vec![role.to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %session.user_id, role = %role, "Admin signed in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
        session: session_response(&session, role),
    }))
}

/// GET /api/auth/session
pub async fn session(admin: AdminSession) -> AppResult<HttpResponse> {
    let session = admin.session();
    let role = session
        .role()
        .ok_or(AuthError::NoAdminProfile)?;

    Ok(HttpResponse::Ok().json(session_response(session, role)))
}

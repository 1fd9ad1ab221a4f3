//! Admin authentication extractor.
//!
//! A valid token is necessary but not sufficient: every request re-reads the
//! admin profile, so revoking a profile takes effect immediately.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use vinculo_core::domain::{Session, has_admin_role};
use vinculo_core::ports::{AuthError, BaseRepository};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Signed-in admin. Use as a handler argument to require admin rights.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl AdminSession {
    pub fn session(&self) -> &Session {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("authorization header is not ASCII".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("expected a Bearer token".to_string()))
}

/// Resolve the admin session behind a request.
pub async fn authorize(req: &HttpRequest, state: &AppState) -> Result<Session, AppError> {
    let token = bearer_token(req)?;
    let claims = state.tokens.validate_token(&token)?;

    let profile = state.profiles.find_by_id(claims.user_id).await?;
    let session = Session {
        user_id: claims.user_id,
        email: claims.email,
        profile,
    };

    if !has_admin_role(&session) {
        tracing::warn!(user_id = %session.user_id, "Token without admin profile rejected");
        return Err(AuthError::NoAdminProfile.into());
    }

    Ok(session)
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

            authorize(&req, &state).await.map(AdminSession)
        })
    }
}

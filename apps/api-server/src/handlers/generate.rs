//! Draft generation function.
//!
//! Mirrors a serverless function: open CORS, `OPTIONS` preflight, and
//! `{"error": "..."}` bodies instead of problem details.

use actix_web::http::StatusCode;
use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use vinculo_core::domain::validation::validate_generation_request;
use vinculo_core::domain::{GenerationRequest, TargetLength, Tone};
use vinculo_shared::FunctionError;
use vinculo_shared::dto::GenerateContentRequest;

use crate::middleware::auth::authorize;
use crate::observability::RequestId;
use crate::state::AppState;

/// Headers the browser may send on the function call.
const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Headers", ALLOWED_HEADERS))
        .add(("Access-Control-Allow-Methods", "POST, OPTIONS"))
}

fn error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(FunctionError::new(message))
}

/// Turn the wire body into a brief, applying defaults for tone and length.
fn parse_brief(body: &[u8]) -> Result<GenerationRequest, String> {
    let raw: GenerateContentRequest =
        serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {}", e))?;

    let tone = match raw.tone.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(tone) => tone.parse::<Tone>()?,
        None => Tone::default(),
    };
    let target_length = match raw
        .target_length
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(length) => length.parse::<TargetLength>()?,
        None => TargetLength::default(),
    };

    let request = GenerationRequest {
        topic: raw.topic.unwrap_or_default(),
        category: raw.category.unwrap_or_default(),
        tone,
        target_length,
    };
    validate_generation_request(&request).map_err(|errors| errors.join(", "))?;

    Ok(request)
}

/// OPTIONS /functions/v1/generate-blog-content
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// POST /functions/v1/generate-blog-content
pub async fn generate(
    req: HttpRequest,
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Bytes,
) -> HttpResponse {
    if let Err(e) = authorize(&req, &state).await {
        return error(e.status_code(), e.public_message());
    }

    let brief = match parse_brief(&body) {
        Ok(brief) => brief,
        Err(message) => return error(StatusCode::BAD_REQUEST, message),
    };

    match state.generator.generate(&brief).await {
        Ok(content) => HttpResponse::Ok().json(content),
        Err(e) => {
            tracing::error!(
                request_id = %request_id.as_str(),
                error = %e,
                "Draft generation failed"
            );
            error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vinculo_core::domain::{AdminRole, Language, Post, PostStats, PostStatus};

/// Admin sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signed-in admin, as shown by the panel header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub session: SessionResponse,
}

/// Query string of the public listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub lang: Option<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListResponse {
    pub posts: Vec<Post>,
    pub featured: Option<Post>,
    /// True when the content store was unreachable and bundled posts are shown.
    pub degraded: bool,
}

/// Query string of the admin post list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminPostsQuery {
    pub q: Option<String>,
    pub status: Option<PostStatus>,
    pub lang: Option<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: PostStats,
    pub recent_posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleFeaturedRequest {
    pub featured: bool,
}

/// Body of the draft generation function.
///
/// Every field is optional on the wire so that a missing topic or category
/// is answered with a 400 `{error}` body rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub target_length: Option<String>,
}

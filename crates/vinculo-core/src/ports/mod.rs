//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod generator;
mod rate_limit;
mod repository;
mod source;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use generator::TextModel;
pub use source::PostSource;
pub use rate_limit::{RateLimitResult, RateLimiter};
pub use repository::{
    AdminProfileRepository, BaseRepository, CategoryRepository, PostRepository, UserRepository,
};

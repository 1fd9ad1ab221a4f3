//! # Vinculo Infrastructure
//!
//! Concrete implementations of the ports defined in `vinculo-core`:
//! the PostgreSQL content store, the in-memory store, the bundled post
//! snapshot, the Gemini text model, admin authentication and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `postgres` - PostgreSQL content store via SeaORM
//! - `rate-limit` - Rate limiting via governor

pub mod ai;
pub mod auth;
pub mod memory;
pub mod snapshot;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use ai::{GeminiClient, GeminiConfig};
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use memory::{
    InMemoryAdminProfileRepository, InMemoryCategoryRepository, InMemoryPostRepository,
    InMemoryUserRepository,
};
pub use snapshot::StaticSnapshot;

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresAdminProfileRepository, PostgresCategoryRepository,
    PostgresPostRepository, PostgresUserRepository,
};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

//! In-memory store - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

mod accounts;
mod posts;

pub use accounts::{InMemoryAdminProfileRepository, InMemoryUserRepository};
pub use posts::{InMemoryCategoryRepository, InMemoryPostRepository};

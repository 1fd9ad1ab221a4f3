//! PostgreSQL content store.

mod connections;
pub mod entity;
mod post_repo;
mod postgres_base;
mod postgres_repo;

pub use connections::{DatabaseConfig, connect, connect_lazy};
pub use sea_orm::DbConn;
pub use post_repo::PostgresPostRepository;
pub use postgres_base::PostgresBaseRepository;
pub use postgres_repo::{
    PostgresAdminProfileRepository, PostgresCategoryRepository, PostgresUserRepository,
};

pub(crate) use postgres_repo::mask_email;

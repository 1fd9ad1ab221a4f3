use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AdminProfile, Category, Post, PostStatus, PostUpdate, User};
use crate::error::RepoError;

/// Generic repository trait for simple single-table entities.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Admin profiles, keyed by the owning user's id.
pub trait AdminProfileRepository: BaseRepository<AdminProfile, Uuid> {}

impl<T> AdminProfileRepository for T where T: BaseRepository<AdminProfile, Uuid> {}

/// Content store for the post aggregate (post row, both translations and
/// category links).
///
/// Implementations return assembled bilingual posts and apply multi-step
/// writes atomically.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Published posts, most recent `published_at` first.
    async fn find_published(&self) -> Result<Vec<Post>, RepoError>;

    /// The published post flagged as featured, if any.
    async fn find_featured(&self) -> Result<Option<Post>, RepoError>;

    /// Every post regardless of status, newest `created_at` first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert the post row, its translations and its category links.
    /// Fails with `RepoError::Constraint` on a duplicate slug.
    async fn insert(&self, post: Post) -> Result<(), RepoError>;

    /// Apply a partial update. `RepoError::NotFound` when the id is unknown.
    async fn update(&self, id: Uuid, changes: PostUpdate) -> Result<(), RepoError>;

    /// Hard delete, including translations and category links.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Set or clear the featured flag. Setting it clears every other post.
    async fn set_featured(&self, id: Uuid, featured: bool) -> Result<(), RepoError>;

    /// Change the status; `published_at` is stamped only when given.
    async fn set_status(
        &self,
        id: Uuid,
        status: PostStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<(), RepoError>;

    /// Move to `archived` and clear `featured` in one atomic write.
    async fn archive(&self, id: Uuid) -> Result<(), RepoError>;

    /// Count posts, optionally restricted to one status.
    async fn count(&self, status: Option<PostStatus>) -> Result<u64, RepoError>;
}

/// Read access to the seeded categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

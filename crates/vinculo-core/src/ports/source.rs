//! Read-only post source consumed by the public catalog.

use async_trait::async_trait;

use crate::domain::Post;
use crate::error::DomainError;

/// Anything the public blog can read published posts from: the live content
/// store or the snapshot bundled with the binary.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn published_posts(&self) -> Result<Vec<Post>, DomainError>;

    async fn featured_post(&self) -> Result<Option<Post>, DomainError>;

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError>;
}

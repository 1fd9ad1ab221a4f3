//! Posts bundled with the binary, served when the content store is down.

use async_trait::async_trait;

use vinculo_core::domain::Post;
use vinculo_core::error::DomainError;
use vinculo_core::ports::PostSource;

const BUNDLED_POSTS: &str = include_str!("posts.json");

/// Read-only snapshot of published posts.
#[derive(Debug, Clone)]
pub struct StaticSnapshot {
    posts: Vec<Post>,
}

impl StaticSnapshot {
    /// Parse the bundled snapshot. Only published posts are kept, newest first.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_POSTS)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let posts: Vec<Post> = serde_json::from_str(json)?;
        Ok(Self::new(posts))
    }

    pub fn new(posts: Vec<Post>) -> Self {
        let mut posts: Vec<Post> = posts.into_iter().filter(Post::is_published).collect();
        posts.sort_by_key(|p| std::cmp::Reverse(p.published_at));
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostSource for StaticSnapshot {
    async fn published_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.clone())
    }

    async fn featured_post(&self) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.iter().find(|p| p.featured).cloned())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.iter().find(|p| p.slug == slug).cloned())
    }
}

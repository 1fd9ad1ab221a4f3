use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use vinculo_core::domain::{Category, Post, PostStatus, PostUpdate, seed_categories};
use vinculo_core::error::RepoError;
use vinculo_core::ports::{CategoryRepository, PostRepository};

/// Posts plus the category link index, the in-memory mirror of
/// `blog_posts` and `blog_post_categories`.
struct Tables {
    posts: HashMap<Uuid, Post>,
    /// Category id to the posts linked to it. The key set is the list of
    /// known categories.
    links: HashMap<String, HashSet<Uuid>>,
}

impl Tables {
    fn check_categories(&self, categories: &[String]) -> Result<(), RepoError> {
        match categories.iter().find(|id| !self.links.contains_key(*id)) {
            Some(id) => Err(RepoError::InvalidReference(format!(
                "unknown category '{}'",
                id
            ))),
            None => Ok(()),
        }
    }

    fn link(&mut self, post_id: Uuid, categories: &[String]) {
        for id in categories {
            if let Some(posts) = self.links.get_mut(id) {
                posts.insert(post_id);
            }
        }
    }

    fn unlink(&mut self, post_id: Uuid) {
        for posts in self.links.values_mut() {
            posts.remove(&post_id);
        }
    }

    fn slug_taken(&self, slug: &str, except: Uuid) -> bool {
        self.posts.values().any(|p| p.slug == slug && p.id != except)
    }
}

/// Post aggregate kept in a map. Each write holds the lock for its whole
/// duration, so multi-step changes are atomic.
pub struct InMemoryPostRepository {
    tables: RwLock<Tables>,
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPostRepository {
    /// Empty store that accepts the seeded categories.
    pub fn new() -> Self {
        let links = seed_categories()
            .into_iter()
            .map(|c| (c.id, HashSet::new()))
            .collect();

        Self {
            tables: RwLock::new(Tables {
                posts: HashMap::new(),
                links,
            }),
        }
    }

    /// Ids of the posts linked to `category_id`.
    pub async fn posts_in_category(&self, category_id: &str) -> Vec<Uuid> {
        self.tables
            .read()
            .await
            .links
            .get(category_id)
            .map(|posts| posts.iter().copied().collect())
            .unwrap_or_default()
    }

    async fn sorted<F, K>(&self, keep: F, key: K) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
        K: Fn(&Post) -> DateTime<Utc>,
    {
        let tables = self.tables.read().await;
        let mut found: Vec<Post> = tables.posts.values().filter(|&p| keep(p)).cloned().collect();
        found.sort_by_key(|p| std::cmp::Reverse(key(p)));
        found
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.sorted(Post::is_published, |p| p.published_at).await)
    }

    async fn find_featured(&self) -> Result<Option<Post>, RepoError> {
        Ok(self
            .sorted(|p| p.featured && p.is_published(), |p| p.published_at)
            .await
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.sorted(|_| true, |p| p.created_at).await)
    }

    async fn insert(&self, post: Post) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.slug_taken(&post.slug, post.id) {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }
        tables.check_categories(&post.categories)?;

        tables.link(post.id, &post.categories);
        tables.posts.insert(post.id, post);
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: PostUpdate) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        if let Some(slug) = &changes.slug {
            if tables.slug_taken(slug, id) {
                return Err(RepoError::Constraint(format!("slug '{}' already exists", slug)));
            }
        }
        if let Some(categories) = &changes.categories {
            tables.check_categories(categories)?;
            tables.unlink(id);
            tables.link(id, categories);
        }

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply(post);
        post.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        tables.unlink(id);
        Ok(())
    }

    async fn set_featured(&self, id: Uuid, featured: bool) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&id) {
            return Err(RepoError::NotFound);
        }

        let now = Utc::now();
        for post in tables.posts.values_mut() {
            if post.id == id {
                post.featured = featured;
                post.updated_at = now;
            } else if featured && post.featured {
                post.featured = false;
            }
        }
        Ok(())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: PostStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.status = status;
        if let Some(at) = published_at {
            post.published_at = at;
        }
        post.updated_at = Utc::now();
        Ok(())
    }

    async fn archive(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.status = PostStatus::Archived;
        post.featured = false;
        post.updated_at = Utc::now();
        Ok(())
    }

    async fn count(&self, status: Option<PostStatus>) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        let count = tables
            .posts
            .values()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .count();
        Ok(count as u64)
    }
}

/// The seeded category list.
pub struct InMemoryCategoryRepository {
    categories: Vec<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: seed_categories(),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.categories.clone())
    }
}

//! Blog data service - the only path from application code to the content store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::validation::missing_titles;
use crate::domain::{Category, Language, NewPost, Post, PostStats, PostStatus, PostUpdate};
use crate::error::{DomainError, RepoError};
use crate::ports::{CategoryRepository, PostRepository, PostSource};

/// Typed read/write operations over the content store.
///
/// Misses are `None` / empty results; store failures are `DomainError::Store`.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { posts, categories }
    }

    pub async fn get_published_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_published().await?)
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.find_by_slug(slug).await?)
    }

    pub async fn get_post_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.find_by_id(id).await?)
    }

    pub async fn get_featured_post(&self) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.find_featured().await?)
    }

    pub async fn get_all_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    /// Newest posts of any status, for the dashboard.
    pub async fn get_recent_posts(&self, limit: usize) -> Result<Vec<Post>, DomainError> {
        let mut posts = self.get_all_posts().await?;
        posts.truncate(limit);
        Ok(posts)
    }

    /// Store a new draft and return it as read back from the store.
    ///
    /// The draft is not validated here; the admin surface does that.
    pub async fn create_post(&self, draft: NewPost) -> Result<Post, DomainError> {
        self.check_categories(&draft.categories).await?;

        let post = draft.into_post(Utc::now());
        let id = post.id;
        let slug = post.slug.clone();

        self.posts
            .insert(post)
            .await
            .map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, slug = %slug, "Post created");

        self.get_post_by_slug(&slug)
            .await?
            .ok_or_else(|| DomainError::post_not_found(&slug))
    }

    pub async fn update_post(&self, id: Uuid, changes: PostUpdate) -> Result<Post, DomainError> {
        if changes.blanks_any_title() && self.require(id).await?.is_published() {
            return Err(DomainError::Validation(
                "a published post needs a title in every language".to_string(),
            ));
        }
        if let Some(categories) = &changes.categories {
            self.check_categories(categories).await?;
        }

        self.posts
            .update(id, changes)
            .await
            .map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, "Post updated");

        self.require(id).await
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Setting `featured` moves the flag: whichever post held it loses it.
    pub async fn toggle_featured(&self, id: Uuid, featured: bool) -> Result<Post, DomainError> {
        self.posts
            .set_featured(id, featured)
            .await
            .map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, featured, "Featured flag changed");
        self.require(id).await
    }

    /// Publish a post. Publishing an already published post is a no-op and
    /// keeps its original `published_at`.
    pub async fn publish_post(&self, id: Uuid) -> Result<Post, DomainError> {
        let post = self.require(id).await?;
        if post.is_published() {
            return Ok(post);
        }

        let missing: Vec<&str> = missing_titles(&post.translations)
            .into_iter()
            .map(|lang| lang.code())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "cannot publish without a title in: {}",
                missing.join(", ")
            )));
        }

        self.posts
            .set_status(id, PostStatus::Published, Some(Utc::now()))
            .await
            .map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, "Post published");
        self.require(id).await
    }

    pub async fn unpublish_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .set_status(id, PostStatus::Draft, None)
            .await
            .map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, "Post unpublished");
        self.require(id).await
    }

    /// Retire a post from the public site without deleting it.
    pub async fn archive_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .archive(id)
            .await
            .map_err(|e| write_error(e, id))?;
        tracing::info!(post_id = %id, "Post archived");
        self.require(id).await
    }

    /// Three independent counts; they may disagree slightly under concurrent writes.
    pub async fn get_stats(&self) -> Result<PostStats, DomainError> {
        let (published, draft, total) = futures::try_join!(
            self.posts.count(Some(PostStatus::Published)),
            self.posts.count(Some(PostStatus::Draft)),
            self.posts.count(None),
        )?;

        Ok(PostStats {
            published,
            draft,
            total,
        })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.list().await?)
    }

    /// Category display names in one language, for prompts and listings.
    pub async fn category_name(
        &self,
        id: &str,
        language: Language,
    ) -> Result<Option<String>, DomainError> {
        Ok(self
            .list_categories()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| c.name(language).to_string()))
    }

    /// Reject category ids that are not in the seeded list.
    async fn check_categories(&self, ids: &[String]) -> Result<(), DomainError> {
        if ids.is_empty() {
            return Ok(());
        }

        let known = self.list_categories().await?;
        let unknown: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| !known.iter().any(|c| c.id == *id))
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "unknown category: {}",
                unknown.join(", ")
            )))
        }
    }

    async fn require(&self, id: Uuid) -> Result<Post, DomainError> {
        self.get_post_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }
}

fn write_error(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        RepoError::Constraint(msg) => DomainError::Duplicate(msg),
        RepoError::InvalidReference(msg) => DomainError::Validation(msg),
        other => DomainError::Store(other),
    }
}

#[async_trait]
impl PostSource for BlogService {
    async fn published_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.get_published_posts().await
    }

    async fn featured_post(&self) -> Result<Option<Post>, DomainError> {
        self.get_featured_post().await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self
            .get_post_by_slug(slug)
            .await?
            .filter(Post::is_published))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};

    /// Store that is always unreachable.
    struct DownStore;

    #[async_trait]
    impl PostRepository for DownStore {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
        async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
        async fn find_featured(&self) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
        async fn insert(&self, _post: Post) -> Result<(), RepoError> {
            Err(RepoError::Constraint("blog_posts_slug_key".to_string()))
        }
        async fn update(&self, _id: Uuid, _changes: PostUpdate) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::NotFound)
        }
        async fn set_featured(&self, _id: Uuid, _featured: bool) -> Result<(), RepoError> {
            Err(RepoError::Query("timeout".to_string()))
        }
        async fn set_status(
            &self,
            _id: Uuid,
            _status: PostStatus,
            _published_at: Option<DateTime<Utc>>,
        ) -> Result<(), RepoError> {
            Err(RepoError::Query("timeout".to_string()))
        }
        async fn archive(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::Query("timeout".to_string()))
        }
        async fn count(&self, _status: Option<PostStatus>) -> Result<u64, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
    }

    struct NoCategories;

    #[async_trait]
    impl CategoryRepository for NoCategories {
        async fn list(&self) -> Result<Vec<Category>, RepoError> {
            Ok(Vec::new())
        }
    }

    struct Seeded;

    #[async_trait]
    impl CategoryRepository for Seeded {
        async fn list(&self) -> Result<Vec<Category>, RepoError> {
            Ok(crate::domain::seed_categories())
        }
    }

    fn service() -> BlogService {
        BlogService::new(Arc::new(DownStore), Arc::new(NoCategories))
    }

    #[tokio::test]
    async fn test_store_failures_propagate() {
        let err = service().get_published_posts().await.unwrap_err();
        assert!(matches!(err, DomainError::Store(RepoError::Connection(_))));

        let err = service().get_stats().await.unwrap_err();
        assert!(matches!(err, DomainError::Store(_)));
    }

    #[tokio::test]
    async fn test_duplicate_slug_maps_to_duplicate() {
        let err = service().create_post(NewPost::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected_before_writing() {
        let blog = BlogService::new(Arc::new(DownStore), Arc::new(Seeded));
        let draft = NewPost {
            categories: vec!["crianza".to_string(), "cocina".to_string()],
            ..Default::default()
        };

        // DownStore would answer Duplicate if the insert were reached.
        let err = blog.create_post(draft).await.unwrap_err();
        match err {
            DomainError::Validation(msg) => assert_eq!(msg, "unknown category: cocina"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_store_reference_errors_are_validation_not_duplicates() {
        let id = Uuid::new_v4();
        let err = write_error(
            RepoError::InvalidReference("blog_post_categories_category_id_fkey".to_string()),
            id,
        );
        assert!(matches!(err, DomainError::Validation(_)));

        let err = write_error(RepoError::Constraint("blog_posts_slug_key".to_string()), id);
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_missing_post_maps_to_not_found() {
        let err = service().delete_post(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}

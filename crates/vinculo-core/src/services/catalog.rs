//! Public read path: live posts with a bundled fallback, plus in-memory
//! search and category filtering.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Language, Post};
use crate::error::DomainError;
use crate::ports::PostSource;

/// Category filter value that matches every post.
pub const ALL_CATEGORIES: &str = "all";

/// Where the posts being shown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentOrigin {
    Live,
    Fallback,
}

/// Posts ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub posts: Vec<Post>,
    pub featured: Option<Post>,
    pub origin: ContentOrigin,
}

/// `Loading -> Ready` on success, `Loading -> Degraded` when the live store
/// failed and the bundled posts are shown instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready(CatalogView),
    Degraded { view: CatalogView, error: String },
}

impl CatalogState {
    pub fn view(&self) -> Option<&CatalogView> {
        match self {
            CatalogState::Loading => None,
            CatalogState::Ready(view) => Some(view),
            CatalogState::Degraded { view, .. } => Some(view),
        }
    }
}

/// Two-source repository. The live source is tried first; the decision to
/// fall back is made here and nowhere else.
#[derive(Clone)]
pub struct BlogCatalog {
    primary: Arc<dyn PostSource>,
    fallback: Arc<dyn PostSource>,
}

impl BlogCatalog {
    pub fn new(primary: Arc<dyn PostSource>, fallback: Arc<dyn PostSource>) -> Self {
        Self { primary, fallback }
    }

    /// Fetch published posts and the featured post concurrently.
    pub async fn load(&self) -> CatalogState {
        let live = futures::try_join!(self.primary.published_posts(), self.primary.featured_post());

        match live {
            Ok((posts, featured)) => CatalogState::Ready(CatalogView {
                posts,
                featured,
                origin: ContentOrigin::Live,
            }),
            Err(err) => {
                tracing::error!(error = %err, "Content store unavailable, serving bundled posts");
                CatalogState::Degraded {
                    view: self.load_fallback().await,
                    error: err.to_string(),
                }
            }
        }
    }

    /// Look up one published post; `None` when neither source has it.
    pub async fn find(&self, slug: &str) -> (Option<Post>, ContentOrigin) {
        match self.primary.post_by_slug(slug).await {
            Ok(post) => (post, ContentOrigin::Live),
            Err(err) => {
                tracing::error!(error = %err, slug, "Content store unavailable, using bundled post");
                let post = self.fallback.post_by_slug(slug).await.unwrap_or_else(|e| {
                    tracing::error!(error = %e, "Bundled posts unreadable");
                    None
                });
                (post, ContentOrigin::Fallback)
            }
        }
    }

    async fn load_fallback(&self) -> CatalogView {
        let posts = self
            .fallback
            .published_posts()
            .await
            .unwrap_or_else(|e| log_fallback_error(e, Vec::new()));
        let featured = self
            .fallback
            .featured_post()
            .await
            .unwrap_or_else(|e| log_fallback_error(e, None));

        CatalogView {
            posts,
            featured,
            origin: ContentOrigin::Fallback,
        }
    }
}

fn log_fallback_error<T>(err: DomainError, empty: T) -> T {
    tracing::error!(error = %err, "Bundled posts unreadable");
    empty
}

/// Case-insensitive substring match over title, excerpt and content in `language`.
/// A blank query matches everything.
pub fn matches_search(post: &Post, query: &str, language: Language) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let t = post.translation(language);
    [&t.title, &t.excerpt, &t.content]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact membership in the post's category list. `all` (or blank) matches everything.
pub fn matches_category(post: &Post, category: &str) -> bool {
    let category = category.trim();
    category.is_empty() || category == ALL_CATEGORIES || post.has_category(category)
}

pub fn search_posts(posts: &[Post], query: &str, language: Language) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| matches_search(p, query, language))
        .cloned()
        .collect()
}

pub fn filter_by_category(posts: &[Post], category: &str) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| matches_category(p, category))
        .cloned()
        .collect()
}

/// Per-visitor view state: the loaded catalog plus the active filters.
///
/// Filters are applied to the posts already in memory; changing them never
/// triggers another fetch.
#[derive(Debug, Clone)]
pub struct BlogContext {
    state: CatalogState,
    search: String,
    category: String,
}

impl Default for BlogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BlogContext {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Loading,
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }

    pub async fn refresh(&mut self, catalog: &BlogCatalog) {
        self.state = CatalogState::Loading;
        self.state = catalog.load().await;
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, CatalogState::Degraded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Degraded { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn featured(&self) -> Option<&Post> {
        self.state.view().and_then(|v| v.featured.as_ref())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn reset_filters(&mut self) {
        self.search.clear();
        self.category = ALL_CATEGORIES.to_string();
    }

    /// Posts passing both filters, in catalog order.
    pub fn visible_posts(&self, language: Language) -> Vec<&Post> {
        self.state
            .view()
            .map(|view| {
                view.posts
                    .iter()
                    .filter(|p| matches_search(p, &self.search, language))
                    .filter(|p| matches_category(p, &self.category))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::domain::{NewPost, PostStatus, Translation, Translations};
    use crate::error::RepoError;

    fn post(slug: &str, es: &str, en: &str, categories: &[&str]) -> Post {
        let mut post = NewPost {
            slug: slug.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            translations: Translations {
                es: Translation {
                    title: es.to_string(),
                    excerpt: format!("Resumen de {}", es),
                    content: "<p>Contenido</p>".to_string(),
                    ..Default::default()
                },
                en: Translation {
                    title: en.to_string(),
                    ..Default::default()
                },
            },
            ..Default::default()
        }
        .into_post(Utc::now());
        post.status = PostStatus::Published;
        post
    }

    fn sample() -> Vec<Post> {
        vec![
            post("tipos", "Los tipos del Eneagrama", "Enneagram types", &["eneagrama"]),
            post("cenas", "Cenas en familia", "Family dinners", &["familia", "crianza"]),
            post("pantallas", "Pantallas y niños", "Screens and kids", &["crianza"]),
        ]
    }

    struct Fixed(Vec<Post>);

    #[async_trait]
    impl PostSource for Fixed {
        async fn published_posts(&self) -> Result<Vec<Post>, DomainError> {
            Ok(self.0.clone())
        }
        async fn featured_post(&self) -> Result<Option<Post>, DomainError> {
            Ok(self.0.first().cloned())
        }
        async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
            Ok(self.0.iter().find(|p| p.slug == slug).cloned())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl PostSource for Unreachable {
        async fn published_posts(&self) -> Result<Vec<Post>, DomainError> {
            Err(RepoError::Connection("connection refused".to_string()).into())
        }
        async fn featured_post(&self) -> Result<Option<Post>, DomainError> {
            Ok(None)
        }
        async fn post_by_slug(&self, _slug: &str) -> Result<Option<Post>, DomainError> {
            Err(RepoError::Connection("connection refused".to_string()).into())
        }
    }

    #[test]
    fn test_search_is_case_insensitive_per_language() {
        let posts = sample();

        let found = search_posts(&posts, "ENEAGRAMA", Language::Es);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "tipos");

        // The English text does not contain the Spanish word.
        assert!(search_posts(&posts, "eneagrama", Language::En).is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let posts = sample();
        assert_eq!(search_posts(&posts, "", Language::Es).len(), 3);
        assert_eq!(search_posts(&posts, "   ", Language::Es).len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let posts = sample();
        let familia = filter_by_category(&posts, "familia");
        assert_eq!(familia.len(), 1);
        assert_eq!(familia[0].slug, "cenas");

        assert_eq!(filter_by_category(&posts, "all"), posts);
        assert!(filter_by_category(&posts, "relaciones").is_empty());
    }

    #[tokio::test]
    async fn test_context_filters_compose_and_reset() {
        let catalog = BlogCatalog::new(Arc::new(Fixed(sample())), Arc::new(Fixed(Vec::new())));
        let mut ctx = BlogContext::new();
        assert!(ctx.is_loading());

        ctx.refresh(&catalog).await;
        assert!(!ctx.is_degraded());
        assert_eq!(ctx.visible_posts(Language::Es).len(), 3);

        ctx.set_category("crianza");
        assert_eq!(ctx.visible_posts(Language::Es).len(), 2);

        ctx.set_search("pantallas");
        let visible = ctx.visible_posts(Language::Es);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].slug, "pantallas");

        ctx.reset_filters();
        assert_eq!(ctx.search(), "");
        assert_eq!(ctx.category(), ALL_CATEGORIES);
        assert_eq!(ctx.visible_posts(Language::Es).len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_store_falls_back_to_bundled_posts() {
        let catalog = BlogCatalog::new(Arc::new(Unreachable), Arc::new(Fixed(sample())));
        let mut ctx = BlogContext::new();
        ctx.refresh(&catalog).await;

        assert!(ctx.is_degraded());
        assert!(ctx.error().unwrap().contains("connection refused"));
        assert_eq!(ctx.visible_posts(Language::Es).len(), 3);
        assert_eq!(ctx.state().view().unwrap().origin, ContentOrigin::Fallback);
        assert_eq!(ctx.featured().map(|p| p.slug.as_str()), Some("tipos"));
    }

    #[tokio::test]
    async fn test_find_falls_back_per_slug() {
        let catalog = BlogCatalog::new(Arc::new(Unreachable), Arc::new(Fixed(sample())));
        let (post, origin) = catalog.find("cenas").await;
        assert_eq!(post.unwrap().slug, "cenas");
        assert_eq!(origin, ContentOrigin::Fallback);

        let (missing, _) = catalog.find("no-existe").await;
        assert!(missing.is_none());
    }
}

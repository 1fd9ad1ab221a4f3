//! Application state - shared across all handlers.

use std::sync::Arc;

use vinculo_core::ports::{
    AdminProfileRepository, CategoryRepository, PasswordService, PostRepository, PostSource,
    RateLimiter, TextModel, TokenService, UserRepository,
};
use vinculo_core::services::{BlogCatalog, BlogService, DraftGenerator};
use vinculo_infra::{
    Argon2PasswordService, GeminiClient, InMemoryAdminProfileRepository,
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserRepository, JwtTokenService,
    StaticSnapshot,
};

use crate::config::AppConfig;
#[cfg(feature = "postgres")]
use crate::config::DatabaseSettings;

/// Which content store backs the running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Repositories behind the services.
pub struct Stores {
    pub kind: StoreKind,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn AdminProfileRepository>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            kind: StoreKind::Memory,
            posts: Arc::new(InMemoryPostRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            profiles: Arc::new(InMemoryAdminProfileRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(conn: vinculo_infra::database::DbConn) -> Self {
        use vinculo_infra::{
            PostgresAdminProfileRepository, PostgresCategoryRepository, PostgresPostRepository,
            PostgresUserRepository,
        };

        let conn = Arc::new(conn);
        Self {
            kind: StoreKind::Postgres,
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.clone())),
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            profiles: Arc::new(PostgresAdminProfileRepository::new(conn)),
        }
    }

    /// Open the configured PostgreSQL store.
    ///
    /// An unreachable database does not stop the server: the pool is created
    /// lazily so public reads fall back to the bundled posts and admin calls
    /// answer 503 until the database comes back.
    #[cfg(feature = "postgres")]
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        use anyhow::Context;
        use vinculo_infra::database::{connect, connect_lazy};

        let db_config = vinculo_infra::DatabaseConfig {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            connect_timeout: settings.connect_timeout,
        };

        match connect(&db_config).await {
            Ok(conn) => Ok(Self::postgres(conn)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Content store unreachable. Serving bundled posts until it recovers."
                );
                let conn = connect_lazy(&db_config)
                    .await
                    .context("invalid content store configuration")?;
                Ok(Self::postgres(conn))
            }
        }
    }

    /// Use PostgreSQL when configured, otherwise run in memory.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(settings) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running on the in-memory store.");
            return Ok(Self::in_memory());
        };

        #[cfg(feature = "postgres")]
        {
            Self::connect(settings).await
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = settings;
            anyhow::bail!("DATABASE_URL is set but this build has no postgres support")
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreKind,
    pub blog: BlogService,
    pub catalog: BlogCatalog,
    pub generator: DraftGenerator,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn AdminProfileRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub limiter: Option<Arc<dyn RateLimiter>>,
}

fn bundled_snapshot() -> StaticSnapshot {
    StaticSnapshot::bundled().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Bundled posts failed to parse; fallback is empty");
        StaticSnapshot::new(Vec::new())
    })
}

impl AppState {
    /// Build the state from environment configuration.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let stores = Stores::from_config(config).await?;

        #[cfg(feature = "rate-limit")]
        let limiter: Option<Arc<dyn RateLimiter>> = Some(Arc::new(
            vinculo_infra::InMemoryRateLimiter::new(config.generate_rate_limit.clone()),
        ));
        #[cfg(not(feature = "rate-limit"))]
        let limiter: Option<Arc<dyn RateLimiter>> = None;

        let state = Self::build(
            stores,
            Arc::new(GeminiClient::new(config.gemini.clone())),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            limiter,
        );

        tracing::info!(store = ?state.store, "Application state initialized");
        Ok(state)
    }

    /// Wire services over the given stores and adapters.
    pub fn build(
        stores: Stores,
        model: Arc<dyn TextModel>,
        tokens: Arc<dyn TokenService>,
        limiter: Option<Arc<dyn RateLimiter>>,
    ) -> Self {
        let blog = BlogService::new(stores.posts, stores.categories);
        let primary: Arc<dyn PostSource> = Arc::new(blog.clone());
        let catalog = BlogCatalog::new(primary, Arc::new(bundled_snapshot()));

        Self {
            store: stores.kind,
            blog,
            catalog,
            generator: DraftGenerator::new(model),
            users: stores.users,
            profiles: stores.profiles,
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            limiter,
        }
    }
}

//! PostgreSQL content store for the post aggregate.
//!
//! A post is spread over three tables (`blog_posts`, `blog_post_translations`,
//! `blog_post_categories`). Reads assemble them into the bilingual `Post`;
//! every multi-table write runs in one transaction.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbConn, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use vinculo_core::domain::{
    Language, Post, PostStatus, PostUpdate, Translation, TranslationUpdate, Translations,
};
use vinculo_core::error::RepoError;
use vinculo_core::ports::PostRepository;

use super::entity::enums::{DbLanguage, DbPostStatus};
use super::entity::{blog_post, post_category, post_translation};
use super::postgres_base::map_db_err;

/// Key for the transaction-scoped advisory lock serializing featured toggles.
const FEATURED_LOCK_KEY: i64 = 0x7669_6e63_6665_6174;

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self { db: db.into() }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, RepoError> {
        self.db.begin().await.map_err(map_db_err)
    }

    async fn find_one<C: ConnectionTrait>(
        db: &C,
        select: sea_orm::Select<blog_post::Entity>,
    ) -> Result<Option<Post>, DbErr> {
        match select.one(db).await? {
            Some(row) => Ok(assemble(db, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

/// Load translations and category links for `rows` and build posts, keeping
/// the order of `rows`.
async fn assemble<C: ConnectionTrait>(
    db: &C,
    rows: Vec<blog_post::Model>,
) -> Result<Vec<Post>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

    let translation_rows = post_translation::Entity::find()
        .filter(post_translation::Column::PostId.is_in(ids.clone()))
        .all(db)
        .await?;
    let link_rows = post_category::Entity::find()
        .filter(post_category::Column::PostId.is_in(ids))
        .order_by_asc(post_category::Column::CategoryId)
        .all(db)
        .await?;

    let mut translations: HashMap<Uuid, Translations> = HashMap::new();
    for row in translation_rows {
        let language: Language = row.language.into();
        let entry = translations.entry(row.post_id).or_default();
        *entry.get_mut(language) = row.into();
    }

    let mut categories: HashMap<Uuid, Vec<String>> = HashMap::new();
    for link in link_rows {
        categories
            .entry(link.post_id)
            .or_default()
            .push(link.category_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| Post {
            translations: translations.remove(&row.id).unwrap_or_default(),
            categories: categories.remove(&row.id).unwrap_or_default(),
            id: row.id,
            slug: row.slug,
            image: row.image,
            published_at: row.published_at.into(),
            author: row.author,
            featured: row.featured,
            status: row.status.into(),
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        })
        .collect())
}

fn link_rows(post_id: Uuid, categories: &[String]) -> Vec<post_category::ActiveModel> {
    categories
        .iter()
        .map(|category_id| post_category::ActiveModel {
            post_id: Set(post_id),
            category_id: Set(category_id.clone()),
        })
        .collect()
}

fn apply_translation_patch(row: &mut post_translation::ActiveModel, patch: &TranslationUpdate) {
    if let Some(title) = &patch.title {
        row.title = Set(title.clone());
    }
    if let Some(excerpt) = &patch.excerpt {
        row.excerpt = Set(excerpt.clone());
    }
    if let Some(content) = &patch.content {
        row.content = Set(content.clone());
    }
    if let Some(meta) = &patch.meta_description {
        row.meta_description = Set(meta.clone());
    }
    if let Some(read_time) = &patch.read_time {
        row.read_time = Set(read_time.clone());
    }
}

async fn patch_translation(
    txn: &DatabaseTransaction,
    post_id: Uuid,
    language: Language,
    patch: &TranslationUpdate,
) -> Result<(), DbErr> {
    let existing = post_translation::Entity::find()
        .filter(post_translation::Column::PostId.eq(post_id))
        .filter(post_translation::Column::Language.eq(DbLanguage::from(language)))
        .one(txn)
        .await?;

    match existing {
        Some(row) => {
            let mut row = row.into_active_model();
            apply_translation_patch(&mut row, patch);
            row.update(txn).await?;
        }
        None => {
            // Repair a post whose row for this language went missing.
            let mut translation = Translation::default();
            patch.apply(&mut translation);
            post_translation::Entity::insert(post_translation::active_model(
                post_id,
                language,
                translation,
            ))
            .exec_without_returning(txn)
            .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Self::find_one(self.db.as_ref(), blog_post::Entity::find_by_id(id))
            .await
            .map_err(map_db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Self::find_one(
            self.db.as_ref(),
            blog_post::Entity::find().filter(blog_post::Column::Slug.eq(slug)),
        )
        .await
        .map_err(map_db_err)
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = blog_post::Entity::find()
            .filter(blog_post::Column::Status.eq(DbPostStatus::Published))
            .order_by_desc(blog_post::Column::PublishedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        assemble(self.db.as_ref(), rows).await.map_err(map_db_err)
    }

    async fn find_featured(&self) -> Result<Option<Post>, RepoError> {
        Self::find_one(
            self.db.as_ref(),
            blog_post::Entity::find()
                .filter(blog_post::Column::Featured.eq(true))
                .filter(blog_post::Column::Status.eq(DbPostStatus::Published))
                .order_by_desc(blog_post::Column::PublishedAt),
        )
        .await
        .map_err(map_db_err)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = blog_post::Entity::find()
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        assemble(self.db.as_ref(), rows).await.map_err(map_db_err)
    }

    async fn insert(&self, post: Post) -> Result<(), RepoError> {
        let txn = self.begin().await?;
        let post_id = post.id;

        let row = blog_post::ActiveModel {
            id: Set(post.id),
            slug: Set(post.slug),
            image: Set(post.image),
            published_at: Set(post.published_at.into()),
            author: Set(post.author),
            featured: Set(post.featured),
            status: Set(post.status.into()),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        };
        blog_post::Entity::insert(row)
            .exec_without_returning(&txn)
            .await
            .map_err(map_db_err)?;

        let Translations { es, en } = post.translations;
        post_translation::Entity::insert_many([
            post_translation::active_model(post_id, Language::Es, es),
            post_translation::active_model(post_id, Language::En, en),
        ])
        .exec_without_returning(&txn)
        .await
        .map_err(map_db_err)?;

        if !post.categories.is_empty() {
            post_category::Entity::insert_many(link_rows(post_id, &post.categories))
                .exec_without_returning(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = %post_id, "Inserted post with translations and categories");
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: PostUpdate) -> Result<(), RepoError> {
        let txn = self.begin().await?;

        let row = blog_post::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut row = row.into_active_model();
        if let Some(slug) = &changes.slug {
            row.slug = Set(slug.clone());
        }
        if let Some(image) = &changes.image {
            row.image = Set(image.clone());
        }
        if let Some(author) = &changes.author {
            row.author = Set(author.clone());
        }
        row.updated_at = Set(Utc::now().into());
        row.update(&txn).await.map_err(map_db_err)?;

        for language in Language::ALL {
            if let Some(patch) = changes.translation(language).filter(|p| !p.is_empty()) {
                patch_translation(&txn, id, language, patch)
                    .await
                    .map_err(map_db_err)?;
            }
        }

        if let Some(categories) = &changes.categories {
            post_category::Entity::delete_many()
                .filter(post_category::Column::PostId.eq(id))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;

            if !categories.is_empty() {
                post_category::Entity::insert_many(link_rows(id, categories))
                    .exec_without_returning(&txn)
                    .await
                    .map_err(map_db_err)?;
            }
        }

        txn.commit().await.map_err(map_db_err)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.begin().await?;

        post_category::Entity::delete_many()
            .filter(post_category::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        post_translation::Entity::delete_many()
            .filter(post_translation::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        let result = blog_post::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }

    async fn set_featured(&self, id: Uuid, featured: bool) -> Result<(), RepoError> {
        let txn = self.begin().await?;

        // Concurrent toggles queue here; each then sees the previous commit.
        txn.execute_unprepared(&format!(
            "SELECT pg_advisory_xact_lock({})",
            FEATURED_LOCK_KEY
        ))
        .await
        .map_err(map_db_err)?;

        if featured {
            blog_post::Entity::update_many()
                .col_expr(blog_post::Column::Featured, Expr::value(false))
                .filter(blog_post::Column::Featured.eq(true))
                .filter(blog_post::Column::Id.ne(id))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        let result = blog_post::Entity::update_many()
            .col_expr(blog_post::Column::Featured, Expr::value(featured))
            .col_expr(
                blog_post::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(blog_post::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: PostStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<(), RepoError> {
        let row = blog_post::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut row = row.into_active_model();
        row.status = Set(status.into());
        if let Some(at) = published_at {
            row.published_at = Set(at.into());
        }
        row.updated_at = Set(Utc::now().into());
        row.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn archive(&self, id: Uuid) -> Result<(), RepoError> {
        // One statement, so status and featured never disagree.
        let result = blog_post::Entity::update_many()
            .set(blog_post::ActiveModel {
                status: Set(DbPostStatus::Archived),
                featured: Set(false),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(blog_post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn count(&self, status: Option<PostStatus>) -> Result<u64, RepoError> {
        let mut query = blog_post::Entity::find();
        if let Some(status) = status {
            query = query.filter(blog_post::Column::Status.eq(DbPostStatus::from(status)));
        }
        query.count(self.db.as_ref()).await.map_err(map_db_err)
    }
}

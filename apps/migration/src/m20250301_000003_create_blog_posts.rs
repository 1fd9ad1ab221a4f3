use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use crate::m20250301_000002_create_categories::{Categories, PostLanguage};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// At most one row may carry `featured = true`.
const SINGLE_FEATURED_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_blog_posts_single_featured ON blog_posts (featured) WHERE featured";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PostStatus::Enum)
                    .values([PostStatus::Draft, PostStatus::Published, PostStatus::Archived])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPosts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BlogPosts::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(BlogPosts::Image).string().not_null().default(""))
                    .col(
                        ColumnDef::new(BlogPosts::PublishedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(BlogPosts::Author).string().not_null().default(""))
                    .col(
                        ColumnDef::new(BlogPosts::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Status)
                            .custom(PostStatus::Enum)
                            .not_null()
                            .default(Expr::cust("'draft'")),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_status_published_at")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Status)
                    .col(BlogPosts::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(SINGLE_FEATURED_INDEX)
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostTranslations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPostTranslations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPostTranslations::PostId).uuid().not_null())
                    .col(
                        ColumnDef::new(BlogPostTranslations::Language)
                            .custom(PostLanguage::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogPostTranslations::Title)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPostTranslations::Excerpt)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPostTranslations::Content)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPostTranslations::MetaDescription)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPostTranslations::ReadTime)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_translations_post")
                            .from(BlogPostTranslations::Table, BlogPostTranslations::PostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_blog_post_translations_language")
                    .table(BlogPostTranslations::Table)
                    .col(BlogPostTranslations::PostId)
                    .col(BlogPostTranslations::Language)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPostCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogPostCategories::PostId).uuid().not_null())
                    .col(
                        ColumnDef::new(BlogPostCategories::CategoryId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(BlogPostCategories::PostId)
                            .col(BlogPostCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_categories_post")
                            .from(BlogPostCategories::Table, BlogPostCategories::PostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_post_categories_category")
                            .from(BlogPostCategories::Table, BlogPostCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPostCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPostTranslations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().if_exists().name(PostStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Slug,
    Image,
    PublishedAt,
    Author,
    Featured,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogPostTranslations {
    Table,
    Id,
    PostId,
    Language,
    Title,
    Excerpt,
    Content,
    MetaDescription,
    ReadTime,
}

#[derive(DeriveIden)]
enum BlogPostCategories {
    Table,
    PostId,
    CategoryId,
}

#[derive(DeriveIden)]
enum PostStatus {
    #[sea_orm(iden = "post_status")]
    Enum,
    Draft,
    Published,
    Archived,
}

//! `blog_post_translations` row - one language of one post.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use vinculo_core::domain::{Language, Translation};

use super::enums::DbLanguage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_post_translations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub language: DbLanguage,
    pub title: String,
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub meta_description: String,
    pub read_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blog_post::Entity",
        from = "Column::PostId",
        to = "super::blog_post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::blog_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Translation {
    fn from(model: Model) -> Self {
        Self {
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            meta_description: model.meta_description,
            read_time: model.read_time,
        }
    }
}

/// New row for `language` of `post_id`.
pub fn active_model(post_id: Uuid, language: Language, translation: Translation) -> ActiveModel {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        post_id: Set(post_id),
        language: Set(language.into()),
        title: Set(translation.title),
        excerpt: Set(translation.excerpt),
        content: Set(translation.content),
        meta_description: Set(translation.meta_description),
        read_time: Set(translation.read_time),
    }
}

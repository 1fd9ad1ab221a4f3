//! Postgres enum types shared by the entities.

use sea_orm::entity::prelude::*;

use vinculo_core::domain::{AdminRole, Language, PostStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "post_status")]
pub enum DbPostStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "post_language")]
pub enum DbLanguage {
    #[sea_orm(string_value = "es")]
    Es,
    #[sea_orm(string_value = "en")]
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "admin_role")]
pub enum DbAdminRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "editor")]
    Editor,
}

impl From<PostStatus> for DbPostStatus {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Draft => DbPostStatus::Draft,
            PostStatus::Published => DbPostStatus::Published,
            PostStatus::Archived => DbPostStatus::Archived,
        }
    }
}

impl From<DbPostStatus> for PostStatus {
    fn from(status: DbPostStatus) -> Self {
        match status {
            DbPostStatus::Draft => PostStatus::Draft,
            DbPostStatus::Published => PostStatus::Published,
            DbPostStatus::Archived => PostStatus::Archived,
        }
    }
}

impl From<Language> for DbLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Es => DbLanguage::Es,
            Language::En => DbLanguage::En,
        }
    }
}

impl From<DbLanguage> for Language {
    fn from(language: DbLanguage) -> Self {
        match language {
            DbLanguage::Es => Language::Es,
            DbLanguage::En => Language::En,
        }
    }
}

impl From<AdminRole> for DbAdminRole {
    fn from(role: AdminRole) -> Self {
        match role {
            AdminRole::Admin => DbAdminRole::Admin,
            AdminRole::Editor => DbAdminRole::Editor,
        }
    }
}

impl From<DbAdminRole> for AdminRole {
    fn from(role: DbAdminRole) -> Self {
        match role {
            DbAdminRole::Admin => AdminRole::Admin,
            DbAdminRole::Editor => AdminRole::Editor,
        }
    }
}

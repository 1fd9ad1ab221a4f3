//! PostgreSQL repositories for accounts and reference data.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};

use vinculo_core::domain::{Category, CategoryNames, Language, User};
use vinculo_core::error::RepoError;
use vinculo_core::ports::{CategoryRepository, UserRepository};

use super::entity::admin_profile::Entity as AdminProfileEntity;
use super::entity::user::{self, Entity as UserEntity};
use super::entity::{category, category_translation};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL admin profile repository.
pub type PostgresAdminProfileRepository = PostgresBaseRepository<AdminProfileEntity>;

/// Keep the first character of the local part; never log a full address.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{}***@{}", first, domain),
            _ => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL category repository.
pub struct PostgresCategoryRepository {
    db: Arc<DbConn>,
}

impl PostgresCategoryRepository {
    pub fn new(db: impl Into<Arc<DbConn>>) -> Self {
        Self { db: db.into() }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .find_with_related(category_translation::Entity)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(row, names)| {
                let mut localized = CategoryNames::default();
                for name in names {
                    match Language::from(name.language) {
                        Language::Es => localized.es = name.name,
                        Language::En => localized.en = name.name,
                    }
                }
                Category {
                    id: row.id,
                    color: row.color,
                    name: localized,
                }
            })
            .collect())
    }
}

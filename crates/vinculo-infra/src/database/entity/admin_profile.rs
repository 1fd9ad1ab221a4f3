//! `admin_profiles` row - grants CMS rights to a user.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::enums::DbAdminRole;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub role: DbAdminRole,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for vinculo_core::domain::AdminProfile {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            role: model.role.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<vinculo_core::domain::AdminProfile> for ActiveModel {
    fn from(profile: vinculo_core::domain::AdminProfile) -> Self {
        Self {
            user_id: Set(profile.user_id),
            role: Set(profile.role.into()),
            created_at: Set(profile.created_at.into()),
        }
    }
}

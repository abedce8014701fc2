//! Account entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role as stored in `accounts.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AccountRole {
    #[sea_orm(string_value = "normal")]
    Normal,
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "superadmin")]
    Superadmin,
}

impl Default for AccountRole {
    fn default() -> Self {
        Self::Normal
    }
}

/// Account model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::admin::Entity")]
    Admin,
    #[sea_orm(has_one = "super::superadmin::Entity")]
    Superadmin,
    #[sea_orm(has_one = "super::normal_user::Entity")]
    NormalUser,
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl Related<super::superadmin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Superadmin.def()
    }
}

impl Related<super::normal_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NormalUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

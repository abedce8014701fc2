//! Create the three role profile tables
//!
//! `admins`, `superadmins` and `normal_users` share one shape: a primary key
//! and a unique reference to the owning account that cascades on delete.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ProfileTable::ALL {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProfileColumn::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ProfileColumn::AccountId)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ProfileColumn::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{}_account_id", table.to_string()))
                                .from(table, ProfileColumn::AccountId)
                                .to(Accounts::Table, Accounts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ProfileTable::ALL {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
pub enum ProfileTable {
    #[iden = "admins"]
    Admins,
    #[iden = "superadmins"]
    Superadmins,
    #[iden = "normal_users"]
    NormalUsers,
}

impl ProfileTable {
    const ALL: [ProfileTable; 3] = [
        ProfileTable::Admins,
        ProfileTable::Superadmins,
        ProfileTable::NormalUsers,
    ];
}

#[derive(Iden)]
pub enum ProfileColumn {
    Id,
    AccountId,
    CreatedAt,
}

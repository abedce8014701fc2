use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::{Account, AccountRepository, DomainResult, NewAccount, Role, RoleProfile};
use crate::infrastructure::database::entities::{account, admin, normal_user, superadmin};

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: account::AccountRole) -> Role {
    match role {
        account::AccountRole::Normal => Role::Normal,
        account::AccountRole::Admin => Role::Admin,
        account::AccountRole::Superadmin => Role::Superadmin,
    }
}

fn domain_role_to_entity(role: Role) -> account::AccountRole {
    match role {
        Role::Normal => account::AccountRole::Normal,
        Role::Admin => account::AccountRole::Admin,
        Role::Superadmin => account::AccountRole::Superadmin,
    }
}

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Role profile tables ─────────────────────────────────────────

/// Insert the profile row for `role`. The three profile tables share one
/// shape, so this is the only place that branches on the role.
async fn insert_profile<C: ConnectionTrait>(
    conn: &C,
    account_id: &str,
    role: Role,
    now: DateTime<Utc>,
) -> Result<RoleProfile, DbErr> {
    let id = uuid::Uuid::new_v4().to_string();

    match role {
        Role::Admin => {
            admin::ActiveModel {
                id: Set(id.clone()),
                account_id: Set(account_id.to_string()),
                created_at: Set(now),
            }
            .insert(conn)
            .await?;
        }
        Role::Superadmin => {
            superadmin::ActiveModel {
                id: Set(id.clone()),
                account_id: Set(account_id.to_string()),
                created_at: Set(now),
            }
            .insert(conn)
            .await?;
        }
        Role::Normal => {
            normal_user::ActiveModel {
                id: Set(id.clone()),
                account_id: Set(account_id.to_string()),
                created_at: Set(now),
            }
            .insert(conn)
            .await?;
        }
    }

    Ok(RoleProfile {
        id,
        account_id: account_id.to_string(),
        role,
        created_at: now,
    })
}

/// Remove every profile row pointing at `account_id`, whatever its table.
async fn delete_profiles<C: ConnectionTrait>(conn: &C, account_id: &str) -> Result<u64, DbErr> {
    let admins = admin::Entity::delete_many()
        .filter(admin::Column::AccountId.eq(account_id))
        .exec(conn)
        .await?;
    let superadmins = superadmin::Entity::delete_many()
        .filter(superadmin::Column::AccountId.eq(account_id))
        .exec(conn)
        .await?;
    let normal_users = normal_user::Entity::delete_many()
        .filter(normal_user::Column::AccountId.eq(account_id))
        .exec(conn)
        .await?;

    Ok(admins.rows_affected + superadmins.rows_affected + normal_users.rows_affected)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn list_accounts(&self) -> DomainResult<Vec<Account>> {
        let models = account::Entity::find()
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(account_model_to_domain).collect())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(account_model_to_domain))
    }

    async fn find_profile(&self, account_id: &str) -> DomainResult<Option<RoleProfile>> {
        let Some(owner) = account::Entity::find_by_id(account_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        // The role column names the one table holding the profile.
        let found = match owner.role {
            account::AccountRole::Admin => owner
                .find_related(admin::Entity)
                .one(&self.db)
                .await?
                .map(|m| (m.id, m.created_at)),
            account::AccountRole::Superadmin => owner
                .find_related(superadmin::Entity)
                .one(&self.db)
                .await?
                .map(|m| (m.id, m.created_at)),
            account::AccountRole::Normal => owner
                .find_related(normal_user::Entity)
                .one(&self.db)
                .await?
                .map(|m| (m.id, m.created_at)),
        };

        Ok(found.map(|(id, created_at)| RoleProfile {
            id,
            account_id: owner.id.clone(),
            role: entity_role_to_domain(owner.role),
            created_at,
        }))
    }

    async fn create_account(&self, new: NewAccount, role: Role) -> DomainResult<Account> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let txn = self.db.begin().await?;

        let model = account::ActiveModel {
            id: Set(id),
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(domain_role_to_entity(role)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let profile = insert_profile(&txn, &model.id, role, now).await?;
        txn.commit().await?;

        debug!(account_id = %model.id, profile_id = %profile.id, %role, "Account row and profile committed");
        Ok(account_model_to_domain(model))
    }

    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DomainResult<Option<Account>> {
        // Filtered UPDATE then re-read in one transaction: a concurrent
        // delete yields `None`, never a half-applied update.
        let txn = self.db.begin().await?;

        let result = account::Entity::update_many()
            .col_expr(account::Column::PasswordHash, Expr::value(password_hash.to_string()))
            .col_expr(account::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(account::Column::Email.eq(email))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let updated = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&txn)
            .await?;
        txn.commit().await?;

        Ok(updated.map(account_model_to_domain))
    }

    async fn delete_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let txn = self.db.begin().await?;

        let existing = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&txn)
            .await?;

        let Some(existing) = existing else {
            txn.rollback().await?;
            return Ok(None);
        };

        let profiles = delete_profiles(&txn, &existing.id).await?;
        account::Entity::delete_by_id(existing.id.clone())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        debug!(account_id = %existing.id, profiles, "Account and profiles removed");
        Ok(Some(account_model_to_domain(existing)))
    }
}

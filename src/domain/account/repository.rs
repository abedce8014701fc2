use async_trait::async_trait;

use super::{Account, NewAccount, Role, RoleProfile};
use crate::shared::DomainResult;

/// Persistence seam for accounts and their role profiles.
///
/// Implementations must create an account together with its role profile
/// as one unit, and remove both together on delete.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list_accounts(&self) -> DomainResult<Vec<Account>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
    async fn find_profile(&self, account_id: &str) -> DomainResult<Option<RoleProfile>>;

    async fn create_account(&self, account: NewAccount, role: Role) -> DomainResult<Account>;

    /// Returns `None` when no account has this email.
    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DomainResult<Option<Account>>;

    /// Returns the removed account, or `None` when no account has this email.
    async fn delete_by_email(&self, email: &str) -> DomainResult<Option<Account>>;
}

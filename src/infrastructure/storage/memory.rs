//! In-memory account storage

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    Account, AccountRepository, DomainError, DomainResult, NewAccount, Role, RoleProfile,
};

struct StoredAccount {
    account: Account,
    profile: RoleProfile,
}

/// In-memory account repository for development and testing.
///
/// Accounts are keyed by email; the profile lives in the same entry so the
/// pair is inserted and removed under one shard lock.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: DashMap<String, StoredAccount>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn list_accounts(&self) -> DomainResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|e| e.value().account.clone())
            .collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(accounts)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self.accounts.get(email).map(|e| e.account.clone()))
    }

    async fn find_profile(&self, account_id: &str) -> DomainResult<Option<RoleProfile>> {
        Ok(self
            .accounts
            .iter()
            .find(|e| e.value().account.id == account_id)
            .map(|e| e.value().profile.clone()))
    }

    async fn create_account(&self, new: NewAccount, role: Role) -> DomainResult<Account> {
        match self.accounts.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict("Email already exists".to_string())),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let account = Account {
                    id: uuid::Uuid::new_v4().to_string(),
                    username: new.username,
                    email: new.email,
                    password_hash: new.password_hash,
                    role,
                    created_at: now,
                    updated_at: now,
                };
                let profile = RoleProfile {
                    id: uuid::Uuid::new_v4().to_string(),
                    account_id: account.id.clone(),
                    role,
                    created_at: now,
                };
                slot.insert(StoredAccount {
                    account: account.clone(),
                    profile,
                });
                Ok(account)
            }
        }
    }

    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DomainResult<Option<Account>> {
        Ok(self.accounts.get_mut(email).map(|mut stored| {
            stored.account.password_hash = password_hash.to_string();
            stored.account.updated_at = Utc::now();
            stored.account.clone()
        }))
    }

    async fn delete_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        Ok(self.accounts.remove(email).map(|(_, stored)| stored.account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            username: "ana".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let repo = InMemoryAccountRepository::new();
        repo.create_account(new_account("ana@x.com"), Role::Admin)
            .await
            .unwrap();

        let err = repo
            .create_account(new_account("ana@x.com"), Role::Normal)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn profile_follows_account_lifecycle() {
        let repo = InMemoryAccountRepository::new();
        let account = repo
            .create_account(new_account("ana@x.com"), Role::Superadmin)
            .await
            .unwrap();

        let profile = repo.find_profile(&account.id).await.unwrap().unwrap();
        assert_eq!(profile.role, Role::Superadmin);

        repo.delete_by_email("ana@x.com").await.unwrap().unwrap();
        assert!(repo.find_profile(&account.id).await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn missing_email_yields_none() {
        let repo = InMemoryAccountRepository::new();
        assert!(repo.update_password_hash("x@x.com", "h").await.unwrap().is_none());
        assert!(repo.delete_by_email("x@x.com").await.unwrap().is_none());
    }
}

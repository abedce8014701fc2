//! Account management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here. Passwords are hashed
//! before they reach the repository; plain text never leaves this module.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Account, AccountRepository, DomainError, DomainResult, NewAccount, Role};
use crate::infrastructure::crypto::password::{hash_password, verify_password, MAX_PASSWORD_BYTES};

/// Input for account creation, before hashing.
#[derive(Debug, Clone)]
pub struct NewAccountRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Account service: orchestrates the account use-cases over an injected
/// repository.
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn AccountRepository>,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(repo: Arc<dyn AccountRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Every stored account, unfiltered.
    pub async fn list_accounts(&self) -> DomainResult<Vec<Account>> {
        self.repo.list_accounts().await
    }

    /// Check a password against the stored hash. Unknown emails and
    /// passwords too long to have been stored verify as `false`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> DomainResult<bool> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        let Some(account) = self.repo.find_by_email(email).await? else {
            return Ok(false);
        };
        Ok(verify_password(password, &account.password_hash).unwrap_or(false))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create an account together with the role profile for `role`.
    pub async fn create_account(&self, request: NewAccountRequest, role: Role) -> DomainResult<Account> {
        let password_hash = self.hash(request.password).await?;

        let account = self
            .repo
            .create_account(
                NewAccount {
                    username: request.username,
                    email: request.email,
                    password_hash,
                },
                role,
            )
            .await?;

        metrics::counter!("accounts_created_total", "role" => role.as_str()).increment(1);
        info!(account_id = %account.id, email = %account.email, %role, "Account created");
        Ok(account)
    }

    /// Delete the account with this email, profile included.
    pub async fn delete_account(&self, email: &str) -> DomainResult<Account> {
        let account = self
            .repo
            .delete_by_email(email)
            .await?
            .ok_or_else(|| DomainError::account_not_found(email))?;

        metrics::counter!("accounts_deleted_total").increment(1);
        info!(account_id = %account.id, email, "Account deleted");
        Ok(account)
    }

    /// Replace the password of the account with this email. No other field
    /// changes.
    pub async fn update_password(&self, email: &str, password: &str) -> DomainResult<Account> {
        let password_hash = self.hash(password.to_string()).await?;

        let account = self
            .repo
            .update_password_hash(email, &password_hash)
            .await?
            .ok_or_else(|| DomainError::account_not_found(email))?;

        info!(account_id = %account.id, email, "Password changed");
        Ok(account)
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Hash off the async runtime. Passwords longer than bcrypt reads are
    /// rejected rather than silently truncated.
    async fn hash(&self, password: String) -> DomainResult<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::Validation(format!(
                "password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| DomainError::Crypto(format!("Hashing task failed: {}", e)))??;
        Ok(hashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::password::MIN_COST;
    use crate::infrastructure::storage::InMemoryAccountRepository;

    fn service() -> (AccountService, Arc<InMemoryAccountRepository>) {
        let repo = Arc::new(InMemoryAccountRepository::new());
        (AccountService::new(repo.clone(), MIN_COST), repo)
    }

    fn request(username: &str, email: &str, password: &str) -> NewAccountRequest {
        NewAccountRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn create_stores_a_hash_not_the_password() {
        let (service, repo) = service();

        let account = service
            .create_account(request("ana", "ana@x.com", "pw1"), Role::Admin)
            .await
            .unwrap();

        assert_ne!(account.password_hash, "pw1");
        assert!(account.password_hash.starts_with("$2"));
        assert!(service.verify_credentials("ana@x.com", "pw1").await.unwrap());

        let profile = repo.find_profile(&account.id).await.unwrap().unwrap();
        assert_eq!(profile.role, Role::Admin);
    }

    #[tokio::test]
    async fn update_password_keeps_identity_fields() {
        let (service, _repo) = service();
        let created = service
            .create_account(request("ana", "ana@x.com", "pw1"), Role::Normal)
            .await
            .unwrap();

        let updated = service.update_password("ana@x.com", "pw2").await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.email, created.email);
        assert!(service.verify_credentials("ana@x.com", "pw2").await.unwrap());
        assert!(!service.verify_credentials("ana@x.com", "pw1").await.unwrap());
    }

    #[tokio::test]
    async fn missing_email_is_not_found() {
        let (service, _repo) = service();

        let err = service.delete_account("nobody@x.com").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = service.update_password("nobody@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        assert!(!service.verify_credentials("nobody@x.com", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn passwords_longer_than_bcrypt_reads_are_rejected() {
        let (service, repo) = service();
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);

        let err = service
            .create_account(request("ana", "ana@x.com", &format!("{prefix}SECRET")), Role::Normal)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "got {err:?}");
        assert!(repo.is_empty());

        service
            .create_account(request("ana", "ana@x.com", &prefix), Role::Normal)
            .await
            .unwrap();
        assert!(service.verify_credentials("ana@x.com", &prefix).await.unwrap());
        assert!(!service
            .verify_credentials("ana@x.com", &format!("{prefix}OTHER"))
            .await
            .unwrap());

        let err = service
            .update_password("ana@x.com", &format!("{prefix}b"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.verify_credentials("ana@x.com", &prefix).await.unwrap());
    }

    #[tokio::test]
    async fn delete_returns_the_removed_account() {
        let (service, _repo) = service();
        let created = service
            .create_account(request("ana", "ana@x.com", "pw1"), Role::Superadmin)
            .await
            .unwrap();

        let deleted = service.delete_account("ana@x.com").await.unwrap();
        assert_eq!(deleted, created);
        assert!(service.list_accounts().await.unwrap().is_empty());
    }
}

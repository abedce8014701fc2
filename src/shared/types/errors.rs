use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Malformed body, missing field or a rejected value.
    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    pub fn account_not_found(email: &str) -> Self {
        DomainError::NotFound {
            entity: "Account",
            field: "email",
            value: email.to_string(),
        }
    }

    /// Whether the failure originates below the domain (database, hashing)
    /// rather than from the caller's input.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Storage(_) | DomainError::Crypto(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        match e {
            InfraError::Database(db) => {
                let msg = db.to_string();
                if msg.contains("UNIQUE") || msg.contains("duplicate") {
                    DomainError::Conflict("Email already exists".to_string())
                } else {
                    DomainError::Storage(msg)
                }
            }
            InfraError::Crypto(e) => DomainError::Crypto(e.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        InfraError::from(e).into()
    }
}

impl From<bcrypt::BcryptError> for DomainError {
    fn from(e: bcrypt::BcryptError) -> Self {
        InfraError::from(e).into()
    }
}

/// Failures outside request handling (startup, config files)
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub mod account;

// Re-export commonly used types
pub use account::{Account, AccountRepository, NewAccount, Role, RoleProfile};

pub use crate::shared::errors::{DomainError, DomainResult};

pub mod accounts;

// Re-export key types for convenience
pub use accounts::{AccountService, NewAccountRequest};

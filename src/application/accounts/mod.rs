//! Accounts module: user account management
//!
//! Contains the `AccountService` which orchestrates the account use-cases:
//! listing, role-aware creation, password changes and deletion.

pub mod service;

pub use service::{AccountService, NewAccountRequest};

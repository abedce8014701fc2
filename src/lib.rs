//! # Account Service
//!
//! User account management over a single HTTP resource, `/api/users`:
//! list, create (normal, admin or superadmin), change password, delete.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Account and role types, the repository port
//! - **application**: Account use cases (hashing, role-specific creation)
//! - **infrastructure**: SeaORM storage, in-memory storage, bcrypt
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryAccountRepository, SeaOrmAccountRepository};

// Re-export API router
pub use interfaces::http::create_api_router;

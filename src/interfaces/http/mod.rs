//! HTTP REST API interfaces
//!
//! - `common`: error envelope and body validation shared by handlers
//! - `modules`: handlers per resource (users, health, metrics, request id)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;

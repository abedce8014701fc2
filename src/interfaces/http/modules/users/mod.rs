//! Users module: account CRUD behind a single dispatcher

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;

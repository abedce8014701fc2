//! Account aggregate
//!
//! Contains the Account entity, its role profile, the creation DTO and the
//! repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{Account, Role, RoleProfile};

pub use dto_create::NewAccount;

pub use repository::AccountRepository;

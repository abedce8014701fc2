//! Database entities module

pub mod account;
pub mod admin;
pub mod normal_user;
pub mod superadmin;


//! Interfaces layer - adapters exposing the application to the outside

pub mod http;

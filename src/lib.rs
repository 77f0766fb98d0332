//! Data layer for a title review service: users with roles, categories,
//! genres, titles, reviews and comments, plus the schema migrations that
//! create them.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod mail;
pub mod manager;
pub mod migration;
pub mod store;

pub use error::{AppError, AppResult};

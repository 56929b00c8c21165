//! Users service
//!
//! A small HTTP JSON API over a single PostgreSQL `users` table. The
//! [`repositories::UserController`] trait maps each operation to one SQL
//! statement; [`routes`] adapts it to HTTP.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use state::AppState;

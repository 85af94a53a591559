//! Sales Dashboard Library
//!
//! Backend for a password-gated sales dashboard over a fixed SQLite
//! database: canned reports, free-form SQL, and natural-language questions
//! translated to SQL by a hosted chat-completion model.

pub mod ai;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reports;
pub mod server;

pub use config::Config;
pub use error::{DashResult, DashboardError};

//! villadesk - a villa agency admin server.
//!
//! One HTTP server serves the public marketing site and contact form, and an
//! admin-only property CRUD panel gated by cookie-session login. The crate is
//! organized leaves-first:
//!
//! - [`db`]: SQLite access, schema migrations, user records
//! - [`auth`]: password hashing, credential verification, session lifecycle
//! - [`property`]: property listings and their repository
//! - [`contact`]: contact form persistence
//! - [`images`]: uploaded image storage
//! - [`web`]: routing, guard middleware, handlers and the server

pub mod auth;
pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod images;
pub mod logging;
pub mod property;
pub mod web;

pub use auth::{hash_password, verify_password};
pub use config::Config;
pub use db::Database;
pub use error::{Result, VillaError};
pub use web::WebServer;

//! HTTP surface for villadesk: routing, handlers, middleware and the server.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use router::create_router;
pub use server::WebServer;

//! Middleware for the villadesk HTTP surface.

mod guard;
mod session;

pub use guard::{admin_guard, PublicPaths};
pub use session::{resolve_session, CurrentUser, SessionContext};

//! Session resolution middleware.
//!
//! Runs on every request: reads the session cookie, resolves it against the
//! session store (extending the sliding expiry window) and stashes the result
//! as a [`SessionContext`] request extension. Downstream code never touches
//! the store directly.

use std::sync::Arc;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::auth::AuthenticatedUser;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Per-request session state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// The session identifier the client presented, valid or not. Kept so a
    /// later login can destroy the pre-login session.
    pub session_id: Option<String>,
    /// Logged-in identity, when the cookie resolved to a live session.
    pub user: Option<AuthenticatedUser>,
}

impl SessionContext {
    /// Whether the request carries a live admin session.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }
}

/// Middleware: resolve the session cookie into a [`SessionContext`].
///
/// A store failure during resolution is treated as "no session" rather than
/// failing the request; public pages keep working when the store is down.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let mut context = SessionContext::default();

    if let Some(cookie) = jar.get(state.cookie_name()) {
        let id = cookie.value().to_string();
        match state.sessions.resolve(&id).await {
            Ok(Some(record)) => context.user = record.user,
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Session resolution failed"),
        }
        context.session_id = Some(id);
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Extractor for the authenticated user on an admitted request.
///
/// The guard rejects unauthenticated requests before handlers run; this
/// extractor hands the identity to handlers that need it.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .and_then(|context| context.user.clone())
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

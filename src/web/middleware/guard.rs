//! Admin access guard.
//!
//! A request gate over protected routes: configured public paths pass
//! through, anonymous requests get 401, authenticated non-admins get 403.
//! The outcome rendering is content-negotiated on the `Accept` header so
//! browser navigations get redirects while API consumers get JSON. A
//! role-forbidden outcome never redirects to the login page: the client is
//! already logged in, and bouncing it there would loop.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::ACCEPT, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::session::SessionContext;
use crate::config::GuardConfig;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Paths admitted without any session check.
///
/// Every externally reachable spelling of the login page must be listed in
/// the configuration; the guard only matches, it never normalizes.
#[derive(Debug, Clone, Default)]
pub struct PublicPaths {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl PublicPaths {
    /// Build the allow-list from configuration.
    pub fn from_config(config: &GuardConfig) -> Self {
        Self {
            exact: config.public_paths.clone(),
            prefixes: config.public_prefixes.clone(),
        }
    }

    /// Whether the path is admitted regardless of session state.
    pub fn matches(&self, path: &str) -> bool {
        self.exact.iter().any(|p| p == path)
            || self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// Whether the client negotiates for a JSON response.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// Middleware: admit admins, deny everyone else.
///
/// Reads the [`SessionContext`] placed by the session middleware; it never
/// mutates session state itself.
pub async fn admin_guard(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if state.public_paths.matches(path) {
        return next.run(request).await;
    }

    let user = request
        .extensions()
        .get::<SessionContext>()
        .and_then(|context| context.user.clone());

    match user {
        None => {
            debug!(path = %path, "Unauthenticated request to protected path");
            if wants_json(request.headers()) {
                ApiError::unauthorized("Please log in to continue")
                    .with_redirect(state.login_page().to_string())
                    .into_response()
            } else {
                Redirect::to(state.login_page()).into_response()
            }
        }
        Some(user) if !user.role.is_admin() => {
            debug!(path = %path, username = %user.username, "Non-admin denied");
            if wants_json(request.headers()) {
                ApiError::forbidden("Access denied. Admin role required.").into_response()
            } else {
                (StatusCode::FORBIDDEN, "Access denied. Admin role required.").into_response()
            }
        }
        Some(_) => next.run(request).await,
    }
}

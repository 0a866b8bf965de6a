//! Static page handlers that need session awareness.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use tracing::warn;

use crate::web::middleware::SessionContext;

use super::AppState;

/// GET /admin/login.html - the login page.
///
/// Public, but an already-authenticated admin is sent straight to the
/// dashboard instead of being shown a login form.
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<SessionContext>,
) -> Response {
    if context.is_admin() {
        return Redirect::to(state.dashboard_page()).into_response();
    }

    let path = Path::new(state.admin_path()).join("login.html");
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            [(CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Login page asset missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

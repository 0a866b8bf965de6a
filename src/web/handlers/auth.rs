//! Authentication handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info};

use crate::auth::{hash_password, verify_password, validate_password};
use crate::db::UserRepository;
use crate::web::dto::{
    AuthStatusResponse, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    UserInfo,
};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentUser, SessionContext};

use super::AppState;

/// POST /api/login - establish an authenticated session.
///
/// The fresh session identifier is persisted before the success response is
/// emitted, and the pre-login identifier stops resolving. A session
/// persistence failure is a 500, never a silent success.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<SessionContext>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let user = state.credentials.verify(&req.username, &req.password).await?;

    let id = state
        .sessions
        .login(context.session_id.as_deref(), user.clone())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to persist session at login");
            ApiError::internal("Failed to establish session")
        })?;

    info!(username = %user.username, "Login successful");

    let jar = jar.add(state.session_cookie(id));
    let response = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        redirect_to: state.dashboard_page().to_string(),
        user: UserInfo::from(&user),
    };
    Ok((jar, Json(response)))
}

/// POST /api/logout - destroy the session.
///
/// A store-side destroy failure is surfaced as a 500, not hidden behind a
/// 200 without effect server-side; the client cookie is cleared either way.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<SessionContext>,
    jar: CookieJar,
) -> Response {
    let jar = jar.remove(state.clear_session_cookie());

    if let Some(id) = context.session_id.as_deref() {
        if let Err(e) = state.sessions.logout(id).await {
            error!(error = %e, "Failed to destroy session at logout");
            return (jar, ApiError::internal("Failed to log out")).into_response();
        }
    }

    let response =
        MessageResponse::new("Logged out").with_redirect(state.login_page().to_string());
    (jar, Json(response)).into_response()
}

/// GET /api/auth/status - report the session state.
pub async fn auth_status(
    Extension(context): Extension<SessionContext>,
) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: context.user.is_some(),
        user: context.user.as_ref().map(UserInfo::from),
    })
}

/// POST /api/auth/change-password - change the acting admin's password.
///
/// Verifies the current password before touching anything. Only available
/// for store-backed identities; the static fallback pair lives in
/// configuration, not the database.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(ApiError::bad_request(
            "Current and new password are required",
        ));
    }
    if user.id == 0 {
        return Err(ApiError::forbidden(
            "Password change is not available for this account",
        ));
    }
    validate_password(&req.new_password).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let repo = UserRepository::new(state.db.pool());
    let record = repo
        .get_by_id(user.id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;

    verify_password(&req.current_password, &record.password)
        .map_err(|_| ApiError::bad_request("Current password is incorrect"))?;

    let hash = hash_password(&req.new_password).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        ApiError::internal("Failed to update password")
    })?;
    repo.update_password(user.id, &hash)
        .await
        .map_err(ApiError::from)?;

    info!(username = %user.username, "Password changed");
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

//! API response DTOs.

use serde::Serialize;

use crate::auth::AuthenticatedUser;

/// Public view of a logged-in user.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Role string ("admin" or "user").
    pub role: String,
}

impl From<&AuthenticatedUser> for UserInfo {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Where the client should navigate next.
    #[serde(rename = "redirectTo")]
    pub redirect_to: String,
    /// Logged-in identity.
    pub user: UserInfo,
}

/// Session status response.
#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    /// Whether the request carried a live authenticated session.
    pub authenticated: bool,
    /// Logged-in identity, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

/// Generic success response with an optional navigation hint.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Where the client should navigate next, if anywhere.
    #[serde(rename = "redirectTo", skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl MessageResponse {
    /// Build a plain success message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            redirect_to: None,
        }
    }

    /// Attach a navigation hint.
    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }
}

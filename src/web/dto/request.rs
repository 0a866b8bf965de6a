//! API request DTOs.

use serde::Deserialize;
use validator::Validate;

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Contact form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    /// Sender name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Sender email address.
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Message subject.
    #[serde(default)]
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    /// Message body.
    #[serde(default)]
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Password change request.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password, verified before any change.
    #[serde(default, rename = "currentPassword")]
    pub current_password: String,
    /// New password.
    #[serde(default, rename = "newPassword")]
    pub new_password: String,
}

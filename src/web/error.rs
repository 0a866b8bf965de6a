//! API error handling for the villadesk HTTP surface.
//!
//! JSON error bodies are flat: `{"success": false, "message": "...",
//! "redirectTo": "..."}` with `redirectTo` present only when the client is
//! expected to navigate somewhere (unauthenticated API consumers are pointed
//! at the login page).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::CredentialError;
use crate::VillaError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400), including input validation failures.
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Backing store unreachable (503).
    ServiceUnavailable,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Where the client should navigate, if anywhere.
    #[serde(rename = "redirectTo", skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    redirect_to: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            redirect_to: None,
        }
    }

    /// Attach a navigation hint to the error body.
    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a service unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            success: false,
            message: self.message,
            redirect_to: self.redirect_to,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<VillaError> for ApiError {
    fn from(err: VillaError) -> Self {
        match &err {
            VillaError::Validation(msg) => ApiError::bad_request(msg.clone()),
            VillaError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            VillaError::Permission(msg) => ApiError::forbidden(msg.clone()),
            VillaError::NotFound(_) => ApiError::not_found(err.to_string()),
            VillaError::DatabaseConnection(_) => {
                tracing::error!("Store unavailable: {}", err);
                ApiError::unavailable("Service temporarily unavailable")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::MissingCredentials => {
                ApiError::bad_request("Username and password are required")
            }
            CredentialError::InvalidCredentials => {
                ApiError::unauthorized("Invalid username or password")
            }
            CredentialError::Store(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_shape() {
        let err = ApiError::unauthorized("Please log in").with_redirect("/admin/login.html");
        let body = ErrorBody {
            success: false,
            message: err.message.clone(),
            redirect_to: err.redirect_to.clone(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Please log in");
        assert_eq!(json["redirectTo"], "/admin/login.html");
    }

    #[test]
    fn test_redirect_omitted_when_absent() {
        let body = ErrorBody {
            success: false,
            message: "nope".to_string(),
            redirect_to: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("redirectTo").is_none());
    }

    #[test]
    fn test_villa_error_mapping() {
        let err: ApiError = VillaError::Validation("Price must be a number".to_string()).into();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err: ApiError = VillaError::NotFound("property".to_string()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err: ApiError = VillaError::DatabaseConnection("refused".to_string()).into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);

        let err: ApiError = VillaError::Database("constraint".to_string()).into();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[test]
    fn test_credential_error_mapping() {
        let err: ApiError = CredentialError::MissingCredentials.into();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err: ApiError = CredentialError::InvalidCredentials.into();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}

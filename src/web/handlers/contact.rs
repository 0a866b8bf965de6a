//! Contact form handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use crate::contact::{ContactRepository, NewContactMessage};
use crate::web::dto::{ContactRequest, MessageResponse};
use crate::web::error::ApiError;

use super::AppState;

/// POST /contact - persist a contact message. Public, no auth.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    req.validate()
        .map_err(|_| ApiError::bad_request("All fields are required"))?;

    let message = NewContactMessage {
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        subject: req.subject.trim().to_string(),
        message: req.message.trim().to_string(),
    };

    let id = ContactRepository::new(state.db.pool())
        .create(&message)
        .await?;

    info!(id, email = %message.email, "Contact message received");
    Ok(Json(MessageResponse::new("Message sent successfully")))
}

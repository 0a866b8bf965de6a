//! Property CRUD handlers.
//!
//! Create and update accept `multipart/form-data`: text fields carry the
//! property columns (`Name`, `Category`, `Price`, ...), `imageFile` carries
//! an optional upload, and `existingImageURL` lets an update keep a
//! previously stored reference. Authorization happens in the guard, upstream
//! of these handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

use crate::property::{NewProperty, Property, PropertyRepository, PropertyUpdate};
use crate::web::dto::MessageResponse;
use crate::web::error::ApiError;

use super::AppState;

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "imageFile";
/// Multipart field carrying the retained image reference on update.
const EXISTING_IMAGE_FIELD: &str = "existingImageURL";

/// An uploaded file: client filename and content.
struct Upload {
    filename: String,
    content: Vec<u8>,
}

/// Drain a multipart body into text fields plus at most one image upload.
///
/// An `imageFile` part with an empty filename or empty content counts as "no
/// upload"; browsers send such parts when the file input is left blank.
async fn collect_form(
    multipart: &mut Multipart,
) -> Result<(HashMap<String, String>, Option<Upload>), ApiError> {
    let mut fields = HashMap::new();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request(format!("Malformed multipart body: {e}"))
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
            if !filename.is_empty() && !content.is_empty() {
                upload = Some(Upload {
                    filename,
                    content: content.to_vec(),
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("Malformed field {name}: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok((fields, upload))
}

/// GET /api/properties - list all properties.
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = PropertyRepository::new(state.db.pool()).list().await?;
    Ok(Json(properties))
}

/// GET /api/properties/:id - fetch one property.
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Property>, ApiError> {
    let property = PropertyRepository::new(state.db.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Property {id} not found")))?;
    Ok(Json(property))
}

/// POST /api/properties - create a property.
///
/// Without an upload the image reference is the configured placeholder.
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let (fields, upload) = collect_form(&mut multipart).await?;

    let image_url = match upload {
        Some(upload) => state
            .images
            .save(&upload.content, &upload.filename)
            .map_err(|e| {
                error!(error = %e, "Failed to store uploaded image");
                ApiError::internal("Failed to store uploaded image")
            })?,
        None => state.images.placeholder().to_string(),
    };

    let new_property = NewProperty::from_form(&fields, image_url)?;
    let property = PropertyRepository::new(state.db.pool())
        .create(&new_property)
        .await?;

    info!(id = property.id, name = %property.name, "Property created");
    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /api/properties/:id - partially update a property.
///
/// A new upload replaces the stored image reference; otherwise a non-empty
/// `existingImageURL` field is kept; otherwise the stored reference stays.
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Property>, ApiError> {
    let (fields, upload) = collect_form(&mut multipart).await?;

    let image_url = match upload {
        Some(upload) => Some(state.images.save(&upload.content, &upload.filename).map_err(
            |e| {
                error!(error = %e, "Failed to store uploaded image");
                ApiError::internal("Failed to store uploaded image")
            },
        )?),
        None => fields
            .get(EXISTING_IMAGE_FIELD)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    let update = PropertyUpdate::from_form(&fields, image_url)?;
    let property = PropertyRepository::new(state.db.pool())
        .update(id, &update)
        .await?;

    info!(id = property.id, "Property updated");
    Ok(Json(property))
}

/// DELETE /api/properties/:id - delete a property.
///
/// The stored upload is removed along with the record; placeholder and
/// external references are left alone.
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = PropertyRepository::new(state.db.pool());
    let property = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Property {id} not found")))?;
    repo.delete(id).await?;

    if let Err(e) = state.images.delete(&property.image_url) {
        warn!(id, error = %e, "Failed to remove stored image");
    }

    info!(id, "Property deleted");
    Ok(Json(MessageResponse::new(format!("Property {id} deleted"))))
}

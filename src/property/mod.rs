//! Property listing domain for villadesk.
//!
//! Wire field names (`PropertyID`, `Category`, ...) follow the columns the
//! admin panel and public pages already consume.

mod repository;

pub use repository::PropertyRepository;

use std::collections::HashMap;

use serde::Serialize;

use crate::{Result, VillaError};

/// A property listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Property {
    /// Unique, stable identifier.
    #[serde(rename = "PropertyID")]
    pub id: i64,
    /// Listing category (villa, apartment, ...).
    #[serde(rename = "Category")]
    pub category: String,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Asking price.
    #[serde(rename = "Price")]
    pub price: f64,
    /// Bedroom count.
    #[serde(rename = "Bedrooms")]
    pub bedrooms: i64,
    /// Bathroom count.
    #[serde(rename = "Bathrooms")]
    pub bathrooms: i64,
    /// Floor area in square meters.
    #[serde(rename = "Area")]
    pub area: f64,
    /// Floor count.
    #[serde(rename = "Floor")]
    pub floor: i64,
    /// Parking spot count.
    #[serde(rename = "Parking")]
    pub parking: i64,
    /// Image reference path.
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    /// Record creation timestamp.
    #[serde(skip)]
    pub created_at: String,
}

/// Validated data for creating a property.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub category: String,
    pub name: String,
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub area: f64,
    pub floor: i64,
    pub parking: i64,
    pub image_url: String,
}

/// Validated partial update. `None` fields retain their stored value.
#[derive(Debug, Clone, Default)]
pub struct PropertyUpdate {
    pub category: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub area: Option<f64>,
    pub floor: Option<i64>,
    pub parking: Option<i64>,
    pub image_url: Option<String>,
}

impl PropertyUpdate {
    /// Whether any field is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.name.is_none()
            && self.price.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.area.is_none()
            && self.floor.is_none()
            && self.parking.is_none()
            && self.image_url.is_none()
    }
}

/// Parse an optional decimal field. Absent → `None`; present but non-numeric
/// → validation error. Absence defaults are the caller's decision.
fn parse_f64(fields: &HashMap<String, String>, name: &str) -> Result<Option<f64>> {
    match fields.get(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| VillaError::Validation(format!("{name} must be a number"))),
    }
}

/// Parse an optional integer field, same rules as [`parse_f64`].
fn parse_i64(fields: &HashMap<String, String>, name: &str) -> Result<Option<i64>> {
    match fields.get(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| VillaError::Validation(format!("{name} must be an integer"))),
    }
}

fn required_text(fields: &HashMap<String, String>, name: &str) -> Result<String> {
    fields
        .get(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| VillaError::Validation(format!("{name} is required")))
}

impl NewProperty {
    /// Build from submitted form fields.
    ///
    /// Name, category and price are required; other numeric fields default
    /// to 0 when absent. A supplied non-numeric value is a validation error,
    /// never silently zeroed.
    pub fn from_form(fields: &HashMap<String, String>, image_url: String) -> Result<Self> {
        let name = required_text(fields, "Name")?;
        let category = required_text(fields, "Category")?;
        let price = parse_f64(fields, "Price")?
            .ok_or_else(|| VillaError::Validation("Price is required".to_string()))?;

        Ok(Self {
            category,
            name,
            price,
            bedrooms: parse_i64(fields, "Bedrooms")?.unwrap_or(0),
            bathrooms: parse_i64(fields, "Bathrooms")?.unwrap_or(0),
            area: parse_f64(fields, "Area")?.unwrap_or(0.0),
            floor: parse_i64(fields, "Floor")?.unwrap_or(0),
            parking: parse_i64(fields, "Parking")?.unwrap_or(0),
            image_url,
        })
    }
}

impl PropertyUpdate {
    /// Build from submitted form fields. Absent fields stay `None` and the
    /// stored value is retained; `image_url` is the already-resolved image
    /// reference (new upload or caller-supplied existing reference).
    pub fn from_form(
        fields: &HashMap<String, String>,
        image_url: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            category: fields
                .get("Category")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            name: fields
                .get("Name")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price: parse_f64(fields, "Price")?,
            bedrooms: parse_i64(fields, "Bedrooms")?,
            bathrooms: parse_i64(fields, "Bathrooms")?,
            area: parse_f64(fields, "Area")?,
            floor: parse_i64(fields, "Floor")?,
            parking: parse_i64(fields, "Parking")?,
            image_url,
        })
    }
}

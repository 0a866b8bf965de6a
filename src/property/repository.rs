//! Property repository for villadesk.
//!
//! CRUD against the properties table. No authorization happens here; the
//! access guard admits requests before they reach this layer.

use sqlx::{QueryBuilder, SqlitePool};

use super::{NewProperty, Property, PropertyUpdate};
use crate::{Result, VillaError};

const SELECT_COLUMNS: &str = "SELECT id, category, name, price, bedrooms, bathrooms, area, \
                              floor, parking, image_url, created_at FROM properties";

/// Repository for property CRUD operations.
pub struct PropertyRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PropertyRepository<'a> {
    /// Create a new PropertyRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all properties, newest first.
    pub async fn list(&self) -> Result<Vec<Property>> {
        let properties =
            sqlx::query_as::<_, Property>(&format!("{SELECT_COLUMNS} ORDER BY id DESC"))
                .fetch_all(self.pool)
                .await?;
        Ok(properties)
    }

    /// Get a property by ID.
    pub async fn get(&self, id: i64) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(property)
    }

    /// Create a property, returning the stored record with its assigned ID.
    pub async fn create(&self, new_property: &NewProperty) -> Result<Property> {
        let result = sqlx::query(
            "INSERT INTO properties (category, name, price, bedrooms, bathrooms, area, floor, parking, image_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_property.category)
        .bind(&new_property.name)
        .bind(new_property.price)
        .bind(new_property.bedrooms)
        .bind(new_property.bathrooms)
        .bind(new_property.area)
        .bind(new_property.floor)
        .bind(new_property.parking)
        .bind(&new_property.image_url)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| VillaError::NotFound("property".to_string()))
    }

    /// Apply a partial update, returning the stored record afterwards.
    ///
    /// Unset fields retain their previous values; an empty update returns the
    /// prior record unmodified.
    pub async fn update(&self, id: i64, update: &PropertyUpdate) -> Result<Property> {
        if update.is_empty() {
            return self
                .get(id)
                .await?
                .ok_or_else(|| VillaError::NotFound("property".to_string()));
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE properties SET ");
        let mut separated = query.separated(", ");

        if let Some(ref category) = update.category {
            separated.push("category = ").push_bind_unseparated(category);
        }
        if let Some(ref name) = update.name {
            separated.push("name = ").push_bind_unseparated(name);
        }
        if let Some(price) = update.price {
            separated.push("price = ").push_bind_unseparated(price);
        }
        if let Some(bedrooms) = update.bedrooms {
            separated.push("bedrooms = ").push_bind_unseparated(bedrooms);
        }
        if let Some(bathrooms) = update.bathrooms {
            separated
                .push("bathrooms = ")
                .push_bind_unseparated(bathrooms);
        }
        if let Some(area) = update.area {
            separated.push("area = ").push_bind_unseparated(area);
        }
        if let Some(floor) = update.floor {
            separated.push("floor = ").push_bind_unseparated(floor);
        }
        if let Some(parking) = update.parking {
            separated.push("parking = ").push_bind_unseparated(parking);
        }
        if let Some(ref image_url) = update.image_url {
            separated
                .push("image_url = ")
                .push_bind_unseparated(image_url);
        }

        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(VillaError::NotFound("property".to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| VillaError::NotFound("property".to_string()))
    }

    /// Delete a property by ID.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(VillaError::NotFound("property".to_string()));
        }
        Ok(())
    }
}

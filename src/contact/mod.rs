//! Contact messages submitted through the public contact form.

use sqlx::SqlitePool;

use crate::Result;

/// A persisted contact message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactMessage {
    /// Unique message ID.
    pub id: i64,
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// When the message was received.
    pub received_at: String,
}

/// Data for a new contact message.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Repository for contact messages.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new ContactRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a contact message.
    pub async fn create(&self, message: &NewContactMessage) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO contacts (name, email, subject, message) VALUES (?, ?, ?, ?)",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .execute(self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List all contact messages, newest first.
    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, subject, message, received_at
             FROM contacts ORDER BY id DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }
}

//! Server-side session state and lifecycle management.
//!
//! Sessions are keyed by an opaque identifier carried in a cookie. A session
//! holds at most one [`AuthenticatedUser`] snapshot; a session without one is
//! anonymous. Expiry is a sliding window: every resolved request extends it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::Role;
use crate::{Result, VillaError};

/// Default sliding-window session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

/// In-session record of the logged-in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User ID (0 for the synthetic static-fallback identity).
    pub id: i64,
    /// Username.
    pub username: String,
    /// User role. `Admin` is the sole admission criterion.
    pub role: Role,
    /// When this user logged in.
    pub login_time: DateTime<Utc>,
}

/// Session state held by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Logged-in identity, if any.
    pub user: Option<AuthenticatedUser>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session has passed its expiry deadline.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Persistence backend for sessions.
///
/// Implement this for alternative backends; the manager never touches storage
/// directly.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session by identifier. Expired records are returned as-is; the
    /// caller decides what expiry means.
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>>;

    /// Persist a session under the given identifier, replacing any previous
    /// record.
    async fn save(&self, id: &str, record: &SessionRecord) -> Result<()>;

    /// Remove a session. Removing an unknown identifier is not an error.
    async fn destroy(&self, id: &str) -> Result<()>;

    /// Remove all expired sessions, returning how many were deleted.
    async fn purge_expired(&self) -> Result<u64>;
}

/// Memory-backed session store (tests, development).
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn save(&self, id: &str, record: &SessionRecord) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(id.to_string(), record.clone());
        Ok(())
    }

    async fn destroy(&self, id: &str) -> Result<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}

/// SQLite-backed session store (production).
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Create a store over the given pool. The `sessions` table comes from
    /// the schema migrations.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((data,)) => {
                let record = serde_json::from_str(&data)
                    .map_err(|e| VillaError::Database(format!("corrupt session record: {e}")))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, id: &str, record: &SessionRecord) -> Result<()> {
        let data = serde_json::to_string(record)
            .map_err(|e| VillaError::Database(format!("session serialization: {e}")))?;

        sqlx::query(
            "INSERT INTO sessions (id, data, expires_at) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, expires_at = excluded.expires_at",
        )
        .bind(id)
        .bind(data)
        .bind(record.expires_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn destroy(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Session lifecycle manager: login, logout, resolution with sliding expiry.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a manager over the given store with the given sliding-window
    /// lifetime.
    pub fn new(store: Arc<dyn SessionStore>, ttl_hours: u64) -> Self {
        Self {
            store,
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    /// Establish a session for a verified user.
    ///
    /// A fresh identifier is generated and persisted before this returns; the
    /// pre-login identifier, if any, is destroyed so it cannot be replayed
    /// (fixation resistance). A persistence failure propagates: the caller
    /// must not report a successful login.
    pub async fn login(
        &self,
        old_id: Option<&str>,
        mut user: AuthenticatedUser,
    ) -> Result<String> {
        user.login_time = Utc::now();
        let id = Uuid::new_v4().to_string();
        let record = SessionRecord {
            user: Some(user),
            expires_at: Utc::now() + self.ttl,
        };

        self.store.save(&id, &record).await?;

        if let Some(old_id) = old_id {
            if old_id != id {
                if let Err(e) = self.store.destroy(old_id).await {
                    warn!(error = %e, "Failed to destroy pre-login session");
                }
            }
        }

        debug!(session_id = %id, "Session established");
        Ok(id)
    }

    /// Destroy a session.
    pub async fn logout(&self, id: &str) -> Result<()> {
        self.store.destroy(id).await
    }

    /// Resolve a session identifier to its record.
    ///
    /// Expired sessions are destroyed and treated as absent. Live sessions
    /// get their expiry window extended (sliding expiry).
    pub async fn resolve(&self, id: &str) -> Result<Option<SessionRecord>> {
        let Some(mut record) = self.store.load(id).await? else {
            return Ok(None);
        };

        if record.is_expired() {
            debug!(session_id = %id, "Session expired");
            self.store.destroy(id).await?;
            return Ok(None);
        }

        record.expires_at = Utc::now() + self.ttl;
        self.store.save(id, &record).await?;
        Ok(Some(record))
    }

    /// Pure read of the logged-in identity, no side effects.
    pub async fn current_user(&self, id: &str) -> Result<Option<AuthenticatedUser>> {
        let Some(record) = self.store.load(id).await? else {
            return Ok(None);
        };
        if record.is_expired() {
            return Ok(None);
        }
        Ok(record.user)
    }

    /// Remove expired sessions from the store.
    pub async fn purge_expired(&self) -> Result<u64> {
        self.store.purge_expired().await
    }
}

//! Credential verification for villadesk.
//!
//! The credential source is selected once at startup from configuration and
//! never chosen per request: either the users table, or an explicit static
//! pair for environments without a backing store.

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use rand_core::OsRng;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

use super::password::verify_password;
use super::session::AuthenticatedUser;
use crate::db::{Role, UserRepository};
use crate::VillaError;

/// Credential verification errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Username or password was empty.
    #[error("username and password are required")]
    MissingCredentials,

    /// Unknown user, inactive user, or wrong password. Deliberately a single
    /// variant: callers must not be able to distinguish the cases.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The backing store failed.
    #[error("credential store error: {0}")]
    Store(#[from] VillaError),
}

/// Where credentials are verified against.
pub enum CredentialSource {
    /// Verify against the users table.
    StoreBacked { pool: SqlitePool },
    /// Verify against a single configured pair, mapping to a synthetic admin
    /// identity. Must be explicitly enabled; rejected in production by config
    /// validation.
    StaticFallback {
        username: String,
        password_hash: String,
    },
}

impl CredentialSource {
    /// Build a store-backed source.
    pub fn store_backed(pool: SqlitePool) -> Self {
        Self::StoreBacked { pool }
    }

    /// Build a static-fallback source. The password is hashed immediately so
    /// verification goes through the same constant-time comparison as stored
    /// hashes.
    pub fn static_fallback(username: &str, password: &str) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| VillaError::Auth(format!("static credential hashing: {e}")))?;

        Ok(Self::StaticFallback {
            username: username.to_string(),
            password_hash: hash.to_string(),
        })
    }

    /// Verify a submitted username/password pair.
    ///
    /// Returns the authenticated identity on success. Unknown users and wrong
    /// passwords are indistinguishable to the caller.
    pub async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, CredentialError> {
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::MissingCredentials);
        }

        match self {
            CredentialSource::StoreBacked { pool } => {
                let repo = UserRepository::new(pool);
                let user = repo
                    .get_active_by_username(username)
                    .await?
                    .ok_or(CredentialError::InvalidCredentials)?;

                verify_password(password, &user.password)
                    .map_err(|_| CredentialError::InvalidCredentials)?;

                debug!(username = %user.username, "Credentials verified");
                Ok(AuthenticatedUser {
                    id: user.id,
                    username: user.username,
                    role: user.role,
                    login_time: Utc::now(),
                })
            }
            CredentialSource::StaticFallback {
                username: expected,
                password_hash,
            } => {
                if username != expected {
                    return Err(CredentialError::InvalidCredentials);
                }
                verify_password(password, password_hash)
                    .map_err(|_| CredentialError::InvalidCredentials)?;

                debug!(username = %expected, "Static fallback credentials verified");
                Ok(AuthenticatedUser {
                    id: 0,
                    username: expected.clone(),
                    role: Role::Admin,
                    login_time: Utc::now(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::db::{Database, NewUser};

    async fn db_with_admin(password: &str) -> Database {
        let db = Database::open_in_memory().await.unwrap();
        let hash = hash_password(password).unwrap();
        UserRepository::new(db.pool())
            .create(&NewUser::new("admin", hash).with_role(Role::Admin))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_store_backed_success() {
        let db = db_with_admin("admin123!").await;
        let source = CredentialSource::store_backed(db.pool().clone());

        let user = source.verify("admin", "admin123!").await.unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_store_backed_wrong_password() {
        let db = db_with_admin("admin123!").await;
        let source = CredentialSource::store_backed(db.pool().clone());

        let err = source.verify("admin", "wrong-password").await.unwrap_err();
        assert!(matches!(err, CredentialError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_user_indistinguishable_from_wrong_password() {
        let db = db_with_admin("admin123!").await;
        let source = CredentialSource::store_backed(db.pool().clone());

        let unknown = source.verify("nobody", "admin123!").await.unwrap_err();
        let wrong = source.verify("admin", "wrong-password").await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let db = db_with_admin("admin123!").await;
        let source = CredentialSource::store_backed(db.pool().clone());

        assert!(matches!(
            source.verify("", "admin123!").await.unwrap_err(),
            CredentialError::MissingCredentials
        ));
        assert!(matches!(
            source.verify("admin", "").await.unwrap_err(),
            CredentialError::MissingCredentials
        ));
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let source = CredentialSource::static_fallback("dev", "dev-password").unwrap();

        let user = source.verify("dev", "dev-password").await.unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.role, Role::Admin);

        assert!(matches!(
            source.verify("dev", "nope").await.unwrap_err(),
            CredentialError::InvalidCredentials
        ));
        assert!(matches!(
            source.verify("other", "dev-password").await.unwrap_err(),
            CredentialError::InvalidCredentials
        ));
    }
}

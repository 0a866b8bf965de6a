//! Authentication for villadesk: password hashing, credential verification
//! and session lifecycle.

mod credentials;
mod password;
mod session;

pub use credentials::{CredentialError, CredentialSource};
pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use session::{
    AuthenticatedUser, MemorySessionStore, SessionManager, SessionRecord, SessionStore,
    SqliteSessionStore, DEFAULT_SESSION_TTL_HOURS,
};

use sqlx::SqlitePool;
use tracing::info;

use crate::db::{NewUser, Role, UserRepository};
use crate::Result;

/// Seed the admin account on first run.
///
/// When the users table is empty, creates an active `admin` user with the
/// configured default password. Does nothing otherwise.
pub async fn bootstrap_admin(pool: &SqlitePool, default_password: &str) -> Result<()> {
    let repo = UserRepository::new(pool);
    if repo.count().await? > 0 {
        return Ok(());
    }

    let hash = hash_password(default_password)
        .map_err(|e| crate::VillaError::Config(format!("default admin password: {e}")))?;

    repo.create(&NewUser::new("admin", hash).with_role(Role::Admin))
        .await?;

    info!("Seeded default admin account");
    Ok(())
}

//! User repository for villadesk.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{Result, VillaError};

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(&new_user.username)
            .bind(&new_user.password)
            .bind(new_user.role.as_str())
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| VillaError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, is_active, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get an active user by exact username match.
    ///
    /// Inactive accounts are invisible here: a disabled user fails login the
    /// same way an unknown one does.
    pub async fn get_active_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, is_active, created_at
             FROM users WHERE username = ? AND is_active = 1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Update a user's password hash.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(VillaError::NotFound("user".to_string()));
        }
        Ok(())
    }

    /// Count all user records.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, Role};

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("agent", "hash").with_role(Role::Admin))
            .await
            .unwrap();

        assert_eq!(user.username, "agent");
        assert_eq!(user.role, Role::Admin);
        assert!(user.is_active);

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "agent");
    }

    #[tokio::test]
    async fn test_get_active_by_username_exact_match() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());
        repo.create(&NewUser::new("agent", "hash")).await.unwrap();

        assert!(repo
            .get_active_by_username("agent")
            .await
            .unwrap()
            .is_some());
        // Exact match only
        assert!(repo
            .get_active_by_username("Agent")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .get_active_by_username("nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_inactive_user_invisible_to_login_lookup() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());
        let user = repo.create(&NewUser::new("former", "hash")).await.unwrap();

        sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(user.id)
            .execute(db.pool())
            .await
            .unwrap();

        assert!(repo
            .get_active_by_username("former")
            .await
            .unwrap()
            .is_none());
        // Still visible by id
        assert!(repo.get_by_id(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());
        repo.create(&NewUser::new("agent", "hash")).await.unwrap();

        let result = repo.create(&NewUser::new("agent", "other")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_password() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());
        let user = repo.create(&NewUser::new("agent", "old")).await.unwrap();

        repo.update_password(user.id, "new").await.unwrap();
        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.password, "new");

        assert!(repo.update_password(9999, "x").await.is_err());
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create(&NewUser::new("agent", "hash")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}

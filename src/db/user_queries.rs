use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::db::{LeagueStore, StoreError};
use crate::models::user::User;
use crate::utils::password::hash_password;

impl LeagueStore {
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password_hash, admin, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password_hash, admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    /// Insert a user unless the username is already taken.
    /// Returns true when a new row was written.
    pub async fn insert_user_if_missing(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
        admin: bool,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, name, password_hash, admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .bind(admin)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute user insert query: {:?}", e);
            e
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Make sure the configured admin account exists
    pub async fn seed_admin(
        &self,
        username: &str,
        name: &str,
        password: &SecretString,
    ) -> Result<(), StoreError> {
        let password_hash = hash_password(password.expose_secret())?;

        if self.insert_user_if_missing(username, name, &password_hash, true).await? {
            tracing::info!("Seeded admin user {}", username);
        } else {
            tracing::debug!("Admin user {} already present", username);
        }
        Ok(())
    }
}

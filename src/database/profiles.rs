// ABOUTME: Profile bootstrap database operations
// ABOUTME: Idempotent ensure-or-create with duplicate-insert race tolerance

use super::Database;
use anyhow::Result;
use tracing::debug;
use uuid::Uuid;

/// Outcome of a successful profile bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    /// A profile row already existed for this user
    Existing,
    /// A profile row was created by this call
    Created,
}

impl ProfileStatus {
    /// True when the profile was created by this call (first run)
    #[must_use]
    pub const fn was_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

impl Database {
    /// Create the profiles table
    pub(super) async fn migrate_profiles(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Check whether a profile row exists for the user
    ///
    /// A missing profile is an expected branch, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the query itself fails
    pub async fn profile_exists(&self, user_id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT user_id FROM profiles WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Ensure a profile row exists for the user, creating one if absent
    ///
    /// Idempotent under concurrency: if another request inserts the same
    /// profile between our lookup and insert, the resulting unique-constraint
    /// violation is treated as success, not failure.
    ///
    /// # Errors
    ///
    /// Returns an error only for genuine store failures; "not found" and
    /// "already exists" are both success paths
    pub async fn ensure_profile(&self, user_id: Uuid) -> Result<ProfileStatus> {
        if self.profile_exists(user_id).await? {
            debug!(user.id = %user_id, "Profile found");
            return Ok(ProfileStatus::Existing);
        }

        debug!(user.id = %user_id, "Profile not found, creating");
        let insert = sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await;

        match insert {
            Ok(_) => Ok(ProfileStatus::Created),
            // A concurrent request won the insert race; the profile exists,
            // which is all the caller asked for
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(user.id = %user_id, "Profile created concurrently, treating as success");
                Ok(ProfileStatus::Existing)
            }
            Err(e) => Err(e.into()),
        }
    }
}

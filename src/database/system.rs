// ABOUTME: Server-first bootstrap of system secrets
// ABOUTME: Stores the JWT signing secret so restarts keep sessions valid

use super::Database;
use crate::auth::generate_jwt_secret;
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use sqlx::Row;

impl Database {
    /// Create the system secrets table
    pub(super) async fn migrate_system(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS system_secrets (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Get a system secret, generating and persisting one on first use
    ///
    /// Safe under concurrent bootstrap: the insert ignores a losing race and
    /// the stored value is re-read, so every instance agrees on one secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or insert fails
    pub async fn get_or_create_system_secret(&self, name: &str) -> Result<String> {
        if let Some(row) = sqlx::query("SELECT value FROM system_secrets WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(row.try_get("value")?);
        }

        let fresh = STANDARD.encode(generate_jwt_secret());
        sqlx::query("INSERT OR IGNORE INTO system_secrets (name, value) VALUES ($1, $2)")
            .bind(name)
            .bind(&fresh)
            .execute(&self.pool)
            .await?;

        let row = sqlx::query("SELECT value FROM system_secrets WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| anyhow!("system secret {name} missing after insert"))?;

        Ok(row.try_get("value")?)
    }
}

// ABOUTME: WOD regeneration history storage
// ABOUTME: Records prompt, previous WOD, and new WOD per regeneration

use super::Database;
use crate::models::WorkoutHistoryEntry;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the workout history table
    pub(super) async fn migrate_history(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_history (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                prompt TEXT NOT NULL,
                previous_wod TEXT NOT NULL,
                new_wod TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_history_workout ON workout_history(workout_id, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record one WOD regeneration
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn save_workout_history(
        &self,
        workout_id: Uuid,
        user_id: Uuid,
        prompt: &str,
        previous_wod: &str,
        new_wod: &str,
    ) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO workout_history (id, workout_id, user_id, prompt, previous_wod, new_wod)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .bind(prompt)
        .bind(previous_wod)
        .bind(new_wod)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// List regeneration history for one workout, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_workout_history(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> Result<Vec<WorkoutHistoryEntry>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workout_history
            WHERE workout_id = $1 AND user_id = $2
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let workout_id: String = row.try_get("workout_id")?;
                let user_id: String = row.try_get("user_id")?;
                Ok(WorkoutHistoryEntry {
                    id: Uuid::parse_str(&id)?,
                    workout_id: Uuid::parse_str(&workout_id)?,
                    user_id: Uuid::parse_str(&user_id)?,
                    prompt: row.try_get("prompt")?,
                    previous_wod: row.try_get("previous_wod")?,
                    new_wod: row.try_get("new_wod")?,
                    created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
                })
            })
            .collect()
    }
}

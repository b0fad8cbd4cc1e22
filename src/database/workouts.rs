// ABOUTME: Workout storage operations scoped to a user
// ABOUTME: Weekday-filtered listing, idempotent week upsert, and section updates

use super::Database;
use crate::models::{SectionKind, Weekday, Workout, WorkoutSections};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the workouts table
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                day TEXT NOT NULL,
                warmup TEXT NOT NULL,
                wod TEXT NOT NULL,
                notes TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_created ON workouts(user_id, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List the user's current week: rows for the five weekday labels,
    /// newest generation first, at most one week's worth
    ///
    /// Rows come back in creation order (descending); presentation sorting
    /// into Monday-first order is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; an empty week is `Ok(vec![])`
    pub async fn list_week(&self, user_id: Uuid) -> Result<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workouts
            WHERE user_id = $1
              AND day IN ('Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday')
            ORDER BY created_at DESC
            LIMIT 5
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_workout).collect()
    }

    /// Get a single workout, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; a missing row is `Ok(None)`
    pub async fn get_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<Option<Workout>> {
        let row = sqlx::query("SELECT * FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_workout).transpose()
    }

    /// Upsert a full week of workouts keyed by id
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails
    pub async fn upsert_week(&self, workouts: &[Workout]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for workout in workouts {
            sqlx::query(
                r"
                INSERT INTO workouts (id, user_id, day, warmup, wod, notes, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT(id) DO UPDATE SET
                    day = excluded.day,
                    warmup = excluded.warmup,
                    wod = excluded.wod,
                    notes = excluded.notes,
                    updated_at = CURRENT_TIMESTAMP
                ",
            )
            .bind(workout.id.to_string())
            .bind(workout.user_id.to_string())
            .bind(workout.day.label())
            .bind(&workout.warmup)
            .bind(&workout.wod)
            .bind(&workout.notes)
            .bind(workout.created_at)
            .bind(workout.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Update a single section of a workout, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails; updating a row that does not
    /// belong to the user affects nothing and returns `Ok(false)`
    pub async fn update_section(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        section: SectionKind,
        value: &str,
    ) -> Result<bool> {
        // Column is selected from a closed enum, never from user input
        let query = match section {
            SectionKind::Warmup => {
                "UPDATE workouts SET warmup = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND user_id = $3"
            }
            SectionKind::Wod => {
                "UPDATE workouts SET wod = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND user_id = $3"
            }
            SectionKind::Notes => {
                "UPDATE workouts SET notes = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND user_id = $3"
            }
        };

        let result = sqlx::query(query)
            .bind(value)
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replace all three sections of a workout in one statement, scoped to
    /// its owner
    ///
    /// Regeneration must not partially persist; a single UPDATE keeps the
    /// three sections consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails; `Ok(false)` when no row matched
    pub async fn update_sections(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        sections: &WorkoutSections,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE workouts
            SET warmup = $1, wod = $2, notes = $3, updated_at = CURRENT_TIMESTAMP
            WHERE id = $4 AND user_id = $5
            ",
        )
        .bind(&sections.warmup)
        .bind(&sections.wod)
        .bind(&sections.notes)
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_workout(row: &sqlx::sqlite::SqliteRow) -> Result<Workout> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let day: String = row.try_get("day")?;
        Ok(Workout {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            day: day
                .parse::<Weekday>()
                .map_err(|e| anyhow::anyhow!("corrupt day label in workouts table: {e}"))?,
            warmup: row.try_get("warmup")?,
            wod: row.try_get("wod")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

// ABOUTME: Database management for users, profiles, workouts, and history
// ABOUTME: SQLite pool setup and startup migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Database Management
//!
//! This module provides database functionality for the Wodforge server. It
//! handles user accounts, profile bootstrap, workout storage, regeneration
//! history, and server-first secrets. Operations are split per domain into
//! submodules; all of them hang off the shared [`Database`] handle.

mod history;
mod profiles;
mod system;
mod users;
mod workouts;

pub use profiles::ProfileStatus;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user and workout storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // SQLite creates the file with mode=rwc but never the directory;
        // a fresh install with sqlite:./data/wodforge.db needs ./data first
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            if !path.starts_with(":memory:") {
                let path = path.trim_start_matches("//");
                let path = path.split('?').next().unwrap_or(path);
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
            }
        }

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        // A pooled `:memory:` database is one database per connection; cap
        // the pool at one connection so every handle sees the same data
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(&connection_options)
                .await?
        } else {
            SqlitePool::connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check that the store answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_profiles().await?;
        self.migrate_workouts().await?;
        self.migrate_history().await?;
        self.migrate_system().await?;
        Ok(())
    }
}

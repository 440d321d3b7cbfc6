use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::subscribers::Subscriber;

pub struct SubscriberStore {
    pool: SqlitePool,
}

impl SubscriberStore {
    pub async fn new(database_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{database_path}"))
            .context("Invalid database path")?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        let migration_sql = include_str!("../../migrations/001_init.sql");
        // Execute each statement separately (sqlx doesn't support multiple statements in one call)
        for statement in migration_sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .with_context(|| format!("Failed to execute migration: {trimmed}"))?;
            }
        }
        Ok(())
    }

    /// All subscribers eligible for alerts, in insertion order.
    pub async fn find_verified(&self) -> Result<Vec<Subscriber>> {
        let subscribers = sqlx::query_as::<_, Subscriber>(
            "SELECT email, location, verified FROM subscribers WHERE verified = 1 ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load verified subscribers")?;

        Ok(subscribers)
    }

    /// Register a new subscriber as unverified. The email is lowercased;
    /// the location is stored exactly as given.
    pub async fn insert_subscriber(&self, email: &str, location: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO subscribers (email, location) VALUES (?, ?)")
            .bind(email.to_lowercase())
            .bind(location)
            .execute(&self.pool)
            .await
            .context("Failed to insert subscriber")?;

        Ok(result.last_insert_rowid())
    }

    /// Flip a subscriber to verified. Returns false if the email is unknown.
    pub async fn mark_verified(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE subscribers SET verified = 1 WHERE email = ?")
            .bind(email.to_lowercase())
            .execute(&self.pool)
            .await
            .context("Failed to mark subscriber verified")?;

        Ok(result.rows_affected() > 0)
    }

    /// Drop a subscriber entirely. Returns false if the email is unknown.
    pub async fn remove_subscriber(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM subscribers WHERE email = ?")
            .bind(email.to_lowercase())
            .execute(&self.pool)
            .await
            .context("Failed to remove subscriber")?;

        Ok(result.rows_affected() > 0)
    }
}

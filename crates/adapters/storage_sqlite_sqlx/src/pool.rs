//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// Default upper bound on pooled connections for file databases.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:tyrehub.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Pool size. Ignored for in-memory databases, which always use one
    /// connection so every query sees the same database.
    pub max_connections: u32,
}

impl Config {
    /// Configuration with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url, self.max_connections).await
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_memory_url(database_url) {
            // Dropping the last connection drops the database with it.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };
        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_memory_urls() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite:file:shop?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite:tyrehub.db"));
    }

    #[tokio::test]
    async fn should_create_pool_and_run_migrations_when_using_memory_db() {
        let db = Config::new("sqlite::memory:").build().await.unwrap();

        // Verify tables exist by querying sqlite_master
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();
        for table in [
            "brands",
            "customers",
            "dealers",
            "order_items",
            "orders",
            "reviews",
            "service_bookings",
            "sessions",
            "tyres",
            "users",
        ] {
            assert!(names.contains(&table), "missing {table} table");
        }
    }

    #[tokio::test]
    async fn should_share_one_memory_database_across_queries() {
        let db = Config::new("sqlite::memory:").build().await.unwrap();

        sqlx::query("CREATE TABLE probe (x INTEGER)")
            .execute(db.pool())
            .await
            .unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM probe")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}

//! SQLite database management with migrations
//!
//! Provides structured storage for per-item link classifications

use crate::error::{Result, SchemaLinksError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::path::Path;

/// Database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Numbered migration scripts, applied in order
const MIGRATIONS: &[&str] = &["
    CREATE TABLE IF NOT EXISTS link_classifications (
        content_kind TEXT NOT NULL,
        content_id   TEXT NOT NULL,
        url          TEXT NOT NULL,
        label        TEXT NOT NULL DEFAULT '',
        position     INTEGER NOT NULL,
        PRIMARY KEY (content_kind, content_id, url)
    );
    CREATE INDEX IF NOT EXISTS idx_link_classifications_item
        ON link_classifications (content_kind, content_id, position);
"];

/// Database manager with migration support
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create a new database connection
    pub fn new(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SchemaLinksError::Io {
                source: e,
                context: format!("Failed to create database directory: {:?}", parent),
            })?;
        }

        let manager = SqliteConnectionManager::file(db_path);

        let pool = Pool::builder()
            .max_size(16)
            .build(manager)
            .map_err(|e| {
                SchemaLinksError::Config(format!("Failed to create connection pool: {}", e))
            })?;

        // Configure connection
        {
            let conn = pool.get().map_err(|e| {
                SchemaLinksError::Config(format!("Failed to get connection: {}", e))
            })?;

            // Enable WAL mode for better concurrency; concurrent saves to
            // the same item still resolve at last write wins.
            conn.execute_batch(
                "
                PRAGMA journal_mode = WAL;
                PRAGMA synchronous = NORMAL;
                PRAGMA foreign_keys = ON;
                PRAGMA busy_timeout = 5000;
                ",
            )?;
        }

        let db = Self { pool };

        db.migrate()?;

        Ok(db)
    }

    /// Get a connection from the pool
    pub fn get_conn(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| SchemaLinksError::Config(format!("Failed to get connection: {}", e)))
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
            [],
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM _migrations",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        for (version, migration) in MIGRATIONS.iter().enumerate() {
            let version = version as i32 + 1;

            if version > current_version {
                tracing::info!("Applying migration {}", version);

                conn.execute_batch(migration)?;

                conn.execute(
                    "INSERT INTO _migrations (version, applied_at) VALUES (?1, datetime('now'))",
                    params![version],
                )?;
            }
        }

        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        let conn = self.get_conn()?;

        let item_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM (
                SELECT DISTINCT content_kind, content_id FROM link_classifications
            )",
            [],
            |row| row.get(0),
        )?;

        let entry_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM link_classifications",
            [],
            |row| row.get(0),
        )?;

        Ok(DbStats {
            item_count: item_count as usize,
            entry_count: entry_count as usize,
        })
    }
}

/// Database statistics
#[derive(Debug)]
pub struct DbStats {
    /// Content items with at least one stored entry
    pub item_count: usize,
    /// Stored URL -> label entries across all items
    pub entry_count: usize,
}

//! Classification store
//!
//! Persists one URL -> label mapping per content item. Saving replaces the
//! whole mapping; an empty submission deletes it, so "cleared" and "never
//! classified" read the same. Authorization is the caller's concern.

pub mod database;

use crate::classify::{Classification, ClassifiedLinks, LinkLabel};
use crate::content::ContentItemId;
use crate::error::Result;
use rusqlite::params;
use std::path::PathBuf;

pub use database::{Database, DbPool, DbStats};

/// SQLite-backed store of link classifications
pub struct ClassificationStore {
    database: Database,
}

impl ClassificationStore {
    /// Open the store under a data directory, creating it if needed
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let db_path = data_dir.join("links.sqlite");
        let database = Database::new(&db_path)?;
        Ok(Self { database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Replace the stored mapping for a content item
    ///
    /// Submitted tokens are sanitized; unrecognized tokens become unset
    /// entries rather than being rejected. An empty submission removes the
    /// mapping entirely. Concurrent saves to the same item resolve at last
    /// write wins.
    pub fn save(&self, item: &ContentItemId, submitted: &[(String, String)]) -> Result<()> {
        let classification =
            Classification::from_submission(submitted.iter().map(|(u, t)| (u.clone(), t)));

        let mut conn = self.database.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM link_classifications WHERE content_kind = ?1 AND content_id = ?2",
            params![item.kind.as_str(), item.id],
        )?;

        for (position, (url, label)) in classification.iter().enumerate() {
            tx.execute(
                "INSERT INTO link_classifications
                    (content_kind, content_id, url, label, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    item.kind.as_str(),
                    item.id,
                    url,
                    label.map(|l| l.as_str()).unwrap_or(""),
                    position as i64
                ],
            )?;
        }

        tx.commit()?;

        if classification.is_empty() {
            tracing::debug!("Cleared stored classification for {}", item);
        } else {
            tracing::debug!(
                "Saved {} classification entries for {}",
                classification.len(),
                item
            );
        }

        Ok(())
    }

    /// Load the stored mapping for a content item
    ///
    /// Returns an empty classification when none exists; absence is not an
    /// error. Entries come back in store order.
    pub fn load(&self, item: &ContentItemId) -> Result<Classification> {
        let conn = self.database.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT url, label FROM link_classifications
             WHERE content_kind = ?1 AND content_id = ?2
             ORDER BY position",
        )?;

        let rows = stmt.query_map(params![item.kind.as_str(), item.id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut classification = Classification::new();
        for row in rows {
            let (url, label) = row?;
            classification.insert(url, LinkLabel::parse(&label));
        }

        Ok(classification)
    }

    /// Load and partition the stored mapping for a content item
    pub fn classified_links(&self, item: &ContentItemId) -> Result<ClassifiedLinks> {
        Ok(self.load(item)?.partition())
    }
}

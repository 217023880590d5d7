pub mod repository;
pub mod sqlite;

pub use repository::interaction::LocationCount;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// Shared handle to the gateway database.
///
/// A single connection behind a mutex: every repository call runs under
/// the lock, which makes the ledger's upsert-then-read an atomic
/// read-modify-write and serializes the log/credit pair against
/// concurrent requests.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::from_connection(sqlite::open_database(path)?))
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::from_connection(sqlite::open_memory_database()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let conn = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&conn)
    }

    pub fn log_interaction(
        &self,
        query_text: &str,
        response_text: &str,
        language: &str,
        location_tag: &str,
    ) -> Result<(), DatabaseError> {
        self.with_conn(|conn| {
            repository::interaction::log_interaction(
                conn,
                query_text,
                response_text,
                language,
                location_tag,
            )
        })
    }

    pub fn add_points(&self, user_id: &str, delta: i64) -> Result<i64, DatabaseError> {
        self.with_conn(|conn| repository::points::add_points(conn, user_id, delta))
    }

    pub fn get_points(&self, user_id: &str) -> Result<i64, DatabaseError> {
        self.with_conn(|conn| repository::points::get_points(conn, user_id))
    }

    pub fn count_interactions(&self) -> Result<i64, DatabaseError> {
        self.with_conn(repository::interaction::count_interactions)
    }

    pub fn counts_by_location(&self) -> Result<Vec<LocationCount>, DatabaseError> {
        self.with_conn(repository::interaction::counts_by_location)
    }

    /// Test hook for breaking the schema to exercise failure paths.
    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> Result<(), DatabaseError> {
        self.with_conn(|conn| {
            conn.execute_batch(sql)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_is_cloneable_and_shares_state() {
        let db = Database::open_in_memory().unwrap();
        let other = db.clone();
        db.add_points("default_user", 10).unwrap();
        assert_eq!(other.get_points("default_user").unwrap(), 10);
    }

    #[test]
    fn file_backed_handle_opens() {
        let tmp = tempfile::tempdir().unwrap();
        let db = Database::open(&tmp.path().join("gateway.db")).unwrap();
        db.log_interaction("q", "a", "en", "Mysuru").unwrap();
        assert_eq!(db.count_interactions().unwrap(), 1);
    }
}

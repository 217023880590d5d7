//! Interaction log repository.
//!
//! One immutable row per completed chat interaction; the timestamp is
//! assigned by SQLite, not the caller.

use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Queries grouped by location tag, for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

/// Append one interaction log entry.
pub fn log_interaction(
    conn: &Connection,
    query_text: &str,
    response_text: &str,
    language: &str,
    location_tag: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO query_logs (query_text, response_text, language, location_tag)
         VALUES (?1, ?2, ?3, ?4)",
        params![query_text, response_text, language, location_tag],
    )?;
    Ok(())
}

/// Total number of logged interactions.
pub fn count_interactions(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM query_logs", [], |row| row.get(0))?;
    Ok(count)
}

/// Interaction counts grouped by location tag, most active first.
pub fn counts_by_location(conn: &Connection) -> Result<Vec<LocationCount>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT location_tag, COUNT(*) AS n FROM query_logs
         GROUP BY location_tag ORDER BY n DESC, location_tag ASC",
    )?;
    let counts = stmt
        .query_map([], |row| {
            Ok(LocationCount {
                location: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();
    Ok(counts)
}

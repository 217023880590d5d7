//! Point ledger repository.
//!
//! One cumulative integer per session key. `add_points` is the only
//! mutation: an upsert followed by a read on the same connection, so
//! each credit is an atomic add-and-return under the database lock.

use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Credit `delta` points to the session's ledger entry and return the
/// new cumulative total. Creates the entry on first use.
pub fn add_points(conn: &Connection, user_id: &str, delta: i64) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO user_points (user_id, points) VALUES (?1, ?2)
         ON CONFLICT(user_id) DO UPDATE SET
         points = points + ?2, updated_at = datetime('now')",
        params![user_id, delta],
    )?;
    get_points(conn, user_id)
}

/// Current cumulative total for a session (0 if never credited).
pub fn get_points(conn: &Connection, user_id: &str) -> Result<i64, DatabaseError> {
    let mut stmt = conn.prepare("SELECT points FROM user_points WHERE user_id = ?1")?;
    match stmt.query_row([user_id], |row| row.get::<_, i64>(0)) {
        Ok(points) => Ok(points),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn first_credit_creates_the_entry() {
        let conn = open_memory_database().unwrap();
        assert_eq!(add_points(&conn, "default_user", 10).unwrap(), 10);
    }

    #[test]
    fn credits_accumulate_by_exactly_the_delta() {
        let conn = open_memory_database().unwrap();
        let first = add_points(&conn, "default_user", 10).unwrap();
        let second = add_points(&conn, "default_user", 10).unwrap();
        assert_eq!(second - first, 10);
        assert!(second >= first, "totals must be monotonically non-decreasing");
    }

    #[test]
    fn ledgers_are_independent_per_session() {
        let conn = open_memory_database().unwrap();
        add_points(&conn, "default_user", 10).unwrap();
        assert_eq!(get_points(&conn, "symptom_check").unwrap(), 0);
    }

    #[test]
    fn uncredited_session_reads_zero() {
        let conn = open_memory_database().unwrap();
        assert_eq!(get_points(&conn, "nobody").unwrap(), 0);
    }
}

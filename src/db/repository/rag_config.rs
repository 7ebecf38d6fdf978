use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Get a retrieval setting by key. Returns None if not set.
pub fn get_rag_config(conn: &Connection, key: &str) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT value FROM rag_config WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Set a retrieval setting (upsert).
pub fn set_rag_config(conn: &Connection, key: &str, value: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO rag_config (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Delete a retrieval setting (revert to the built-in default).
pub fn delete_rag_config(conn: &Connection, key: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM rag_config WHERE key = ?1", [key])?;
    Ok(())
}

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

/// Write an internal audit line into the `log` table.
pub fn write_log(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![now, operation, target, message])?;

    Ok(())
}

/// Most recent audit lines, newest first (migration markers excluded).
pub fn recent_log(conn: &Connection, limit: usize) -> AppResult<Vec<(String, String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT date, operation, message FROM log
         WHERE operation != 'migration_applied'
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit as i64], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

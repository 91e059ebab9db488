use crate::errors::AppResult;
use crate::models::{Category, TimeEntry};
use chrono::NaiveDate;
use rusqlite::{Connection, Result, Row, params};

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn map_entry(row: &Row) -> Result<TimeEntry> {
    Ok(TimeEntry {
        time: row.get("time")?,
        content: row.get("content")?,
        client: row.get("client")?,
        purpose: row.get("purpose")?,
        action: row.get("action")?,
        with_whom: row.get("with_whom")?,
        pccc: row.get("pccc")?,
        remark: row.get("remark")?,
    })
}

/// Entries of a day in insertion order. Rows without time or content are
/// stored but not returned.
pub fn load_entries_by_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT time, content, client, purpose, action, with_whom, pccc, remark
         FROM time_entries
         WHERE date = ?1 AND time != '' AND content != ''
         ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([date_key(date)], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_entries_by_date(conn: &Connection, date: NaiveDate) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM time_entries WHERE date = ?1", [date_key(date)])?)
}

pub fn insert_entry(
    conn: &Connection,
    date: NaiveDate,
    entry: &TimeEntry,
    updated_at: &str,
) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO time_entries
            (date, time, content, client, purpose, action, with_whom, pccc, remark, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?
    .execute(params![
        date_key(date),
        entry.time,
        entry.content,
        entry.client,
        entry.purpose,
        entry.action,
        entry.with_whom,
        entry.pccc,
        entry.remark,
        updated_at,
    ])?;
    Ok(())
}

/// Raw catalog rows `(type, value, group)` in insertion order.
pub fn load_items(conn: &Connection) -> AppResult<Vec<(String, String, Option<String>)>> {
    let mut stmt = conn.prepare("SELECT type, value, grp FROM db_items ORDER BY id ASC")?;
    let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert unless the pair is already stored. Returns true when inserted.
pub fn insert_item(
    conn: &Connection,
    category: Category,
    value: &str,
    group: Option<&str>,
) -> AppResult<bool> {
    let n = conn
        .prepare_cached("INSERT OR IGNORE INTO db_items (type, value, grp) VALUES (?1, ?2, ?3)")?
        .execute(params![category.key(), value, group])?;
    Ok(n > 0)
}

pub fn delete_item(conn: &Connection, category: Category, value: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM db_items WHERE type = ?1 AND value = ?2",
        params![category.key(), value],
    )?)
}

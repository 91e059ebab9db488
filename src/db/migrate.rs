use crate::models::Category;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_time_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            content     TEXT NOT NULL DEFAULT '',
            client      TEXT NOT NULL DEFAULT '',
            purpose     TEXT NOT NULL DEFAULT '',
            action      TEXT NOT NULL DEFAULT '',
            with_whom   TEXT NOT NULL DEFAULT '',
            pccc        TEXT NOT NULL DEFAULT '',
            remark      TEXT NOT NULL DEFAULT '',
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_entries_date ON time_entries(date);
        "#,
    )?;
    Ok(())
}

fn create_db_items_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS db_items (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            type   TEXT NOT NULL,
            value  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table has the given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    tracing::info!(version, "{}", message);
    Ok(())
}

/// Databases created before catalog groups existed lack the `grp` column.
fn migrate_add_group_column(conn: &Connection) -> Result<()> {
    if has_column(conn, "db_items", "grp")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE db_items ADD COLUMN grp TEXT", [])?;
    tracing::info!("added 'grp' column to db_items");
    Ok(())
}

/// Rewrite historical type names (`task`, `function`, `mall`, `costtype`,
/// Japanese labels) to canonical keys, dropping rows that become duplicates,
/// then enforce `(type, value)` uniqueness.
fn migrate_canonical_item_types(conn: &Connection) -> Result<()> {
    let version = "20250410_0001_canonical_item_types";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;

    let rows: Vec<(i64, String, String)> = {
        let mut stmt = tx.prepare("SELECT id, type, value FROM db_items ORDER BY id")?;
        let mapped = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)))?;
        mapped.collect::<Result<_>>()?
    };

    let mut seen = std::collections::HashSet::new();
    for (id, item_type, value) in rows {
        match Category::normalize(&item_type) {
            Some(c) if seen.insert((c, value.clone())) => {
                if c.key() != item_type {
                    tx.execute("UPDATE db_items SET type = ?1 WHERE id = ?2", (c.key(), id))?;
                }
            }
            _ => {
                tx.execute("DELETE FROM db_items WHERE id = ?1", [id])?;
            }
        }
    }

    tx.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_db_items_type_value ON db_items(type, value);",
    )?;
    mark_applied(&tx, version, "Normalized db item types to canonical keys")?;
    tx.commit()
}

/// Public entry point: run all pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_time_entries_table(conn)?;
    create_db_items_table(conn)?;
    migrate_add_group_column(conn)?;
    migrate_canonical_item_types(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_item_types_are_canonicalized() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE db_items (id INTEGER PRIMARY KEY AUTOINCREMENT, type TEXT NOT NULL, value TEXT NOT NULL);
             INSERT INTO db_items (type, value) VALUES ('task', '会議');
             INSERT INTO db_items (type, value) VALUES ('content', '会議');
             INSERT INTO db_items (type, value) VALUES ('mall', '楽天');
             INSERT INTO db_items (type, value) VALUES ('bogus', 'x');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        // idempotent
        run_pending_migrations(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT type, value FROM db_items ORDER BY id")
            .unwrap();
        let rows: Vec<(String, String)> = stmt
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                ("content".to_string(), "会議".to_string()),
                ("with".to_string(), "楽天".to_string()),
            ]
        );
        assert!(has_column(&conn, "db_items", "grp").unwrap());
    }
}

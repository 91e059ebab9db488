//! SQLite connection wrapper (lightweight for CLI usage).

use super::migrate::run_pending_migrations;
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }
}

use super::Repository;
use crate::errors::AppResult;
use crate::models::{DbItem, TimeEntry};
use crate::sheets::{A1Range, Row, SheetsApi};
use chrono::{DateTime, Local, NaiveDate};

pub const DEFAULT_CATALOG_SHEET: &str = "業務データベース";

/// Repository over a spreadsheet used as a document store.
///
/// Holds no state besides the client handle: every call reads from or
/// writes to the remote sheets directly. Mutations follow the sequence
/// read → merge/validate → clear → write and are **not atomic**: if the
/// write fails after the clear succeeded, the target sheet stays empty
/// until the next successful save.
pub struct SheetsRepository<S: SheetsApi> {
    pub(crate) api: S,
    pub(crate) catalog_sheet: String,
    rewrite_attempts: u32,
}

impl<S: SheetsApi> SheetsRepository<S> {
    pub fn new(api: S, catalog_sheet: &str) -> Self {
        Self {
            api,
            catalog_sheet: catalog_sheet.to_string(),
            rewrite_attempts: 1,
        }
    }

    /// Number of times the write step of a clear-then-write is attempted
    /// once the clear succeeded. `1` means no retry.
    pub fn with_rewrite_attempts(mut self, attempts: u32) -> Self {
        self.rewrite_attempts = attempts.max(1);
        self
    }

    /// Create `title` unless a sheet with that title already exists.
    /// Returns true when the sheet was created.
    pub(crate) fn ensure_sheet(&self, title: &str) -> AppResult<bool> {
        if self.api.sheet_titles()?.iter().any(|t| t == title) {
            return Ok(false);
        }
        self.api.add_sheet(title)?;
        tracing::info!(sheet = %title, "created sheet");
        Ok(true)
    }

    /// Clear `clear`, then write `rows` at the top-left of `write`.
    ///
    /// A failed clear leaves the sheet untouched. A failed write leaves it
    /// cleared; the write is re-attempted up to the configured count and
    /// the last error is returned.
    pub(crate) fn rewrite(&self, clear: &A1Range, write: &A1Range, rows: &[Row]) -> AppResult<()> {
        self.api.clear_values(clear)?;

        let mut attempt = 1;
        loop {
            match self.api.update_values(write, rows) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.rewrite_attempts => {
                    tracing::warn!(
                        range = %write,
                        attempt,
                        error = %e,
                        "write after clear failed, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        range = %clear,
                        error = %e,
                        "write after clear failed, range left empty"
                    );
                    return Err(e);
                }
            }
        }
    }
}

impl<S: SheetsApi> Repository for SheetsRepository<S> {
    fn get_time_entries(&self, date: NaiveDate) -> AppResult<Vec<TimeEntry>> {
        self.read_entries(date)
    }

    fn save_time_entries(
        &self,
        date: NaiveDate,
        entries: &[TimeEntry],
    ) -> AppResult<DateTime<Local>> {
        self.write_entries(date, entries)
    }

    fn get_db_items(&self) -> AppResult<Vec<DbItem>> {
        self.read_items()
    }

    fn save_db_items(&self, items: &[DbItem]) -> AppResult<()> {
        self.merge_items(items)
    }

    fn delete_db_items(&self, items: &[DbItem]) -> AppResult<()> {
        self.remove_items(items)
    }
}

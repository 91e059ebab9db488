//! Daily entries: one sheet per calendar date, titled `YYYY-MM-DD`.

use super::codec::{decode_entry, encode_entry, entry_header};
use super::sheets::SheetsRepository;
use crate::errors::AppResult;
use crate::models::TimeEntry;
use crate::sheets::{A1Range, SheetsApi};
use chrono::{DateTime, Local, NaiveDate};

pub fn sheet_title(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl<S: SheetsApi> SheetsRepository<S> {
    pub(crate) fn read_entries(&self, date: NaiveDate) -> AppResult<Vec<TimeEntry>> {
        let title = sheet_title(date);
        let range = A1Range::cells(&title, "A2:H")?;

        let rows = match self.api.get_values(&range) {
            Ok(rows) => rows,
            Err(e) if e.is_missing_range() => {
                tracing::debug!(sheet = %title, "no sheet for date, returning no entries");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let entries: Vec<TimeEntry> = rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let entry = decode_entry(row);
                if entry.is_none() {
                    // data starts on sheet row 2
                    tracing::debug!(sheet = %title, row = i + 2, "skipping row without time or content");
                }
                entry
            })
            .collect();

        tracing::debug!(sheet = %title, rows = rows.len(), entries = entries.len(), "read entries");
        Ok(entries)
    }

    pub(crate) fn write_entries(
        &self,
        date: NaiveDate,
        entries: &[TimeEntry],
    ) -> AppResult<DateTime<Local>> {
        let title = sheet_title(date);
        self.ensure_sheet(&title)?;

        let mut rows = Vec::with_capacity(entries.len() + 1);
        rows.push(entry_header());
        rows.extend(entries.iter().map(encode_entry));

        self.rewrite(
            &A1Range::cells(&title, "A1:Z")?,
            &A1Range::cells(&title, "A1")?,
            &rows,
        )?;

        tracing::info!(sheet = %title, entries = entries.len(), "saved entries");
        Ok(Local::now())
    }
}

//! Repository contract shared by the spreadsheet and SQLite backends.

pub mod catalog;
pub mod codec;
pub mod entries;
pub mod sheets;

pub use sheets::SheetsRepository;

use crate::config::{Backend, Config};
use crate::db::repository::SqliteRepository;
use crate::errors::AppResult;
use crate::models::{Category, DbItem, TimeEntry};
use crate::sheets::HttpSheets;
use chrono::{DateTime, Local, NaiveDate};
use std::collections::HashSet;
use std::time::Duration;

pub trait Repository {
    /// Entries of one day, in sheet order. A day that was never saved has
    /// no entries.
    fn get_time_entries(&self, date: NaiveDate) -> AppResult<Vec<TimeEntry>>;

    /// Replace the entries of one day. Returns the time of the write.
    fn save_time_entries(
        &self,
        date: NaiveDate,
        entries: &[TimeEntry],
    ) -> AppResult<DateTime<Local>>;

    /// The whole catalog, de-duplicated on `(type, value)`, with ids
    /// assigned by position.
    fn get_db_items(&self) -> AppResult<Vec<DbItem>>;

    /// Merge `items` into the stored catalog.
    fn save_db_items(&self, items: &[DbItem]) -> AppResult<()>;

    /// Remove every stored item matching one of `items` on `(type, value)`.
    fn delete_db_items(&self, items: &[DbItem]) -> AppResult<()>;
}

/// Build the repository selected by the configuration.
pub fn open(cfg: &Config) -> AppResult<Box<dyn Repository>> {
    match cfg.backend {
        Backend::Sheets => {
            let api = HttpSheets::new(
                &cfg.sheets.api_base,
                &cfg.sheets.spreadsheet_id,
                &cfg.sheets.access_token,
                Duration::from_secs(cfg.sheets.timeout_secs),
            )?;
            Ok(Box::new(
                SheetsRepository::new(api, &cfg.sheets.catalog_sheet)
                    .with_rewrite_attempts(cfg.sheets.rewrite_attempts),
            ))
        }
        Backend::Sqlite => Ok(Box::new(SqliteRepository::open(&cfg.database)?)),
    }
}

/// Normalize caller-supplied items, skipping (and reporting) those whose
/// type label is not a known category.
pub(crate) fn normalize_incoming(items: &[DbItem]) -> Vec<(Category, String)> {
    items
        .iter()
        .filter_map(|item| match item.category() {
            Some(c) => Some((c, item.value.clone())),
            None => {
                tracing::warn!(
                    item_type = %item.item_type,
                    value = %item.value,
                    "skipping db item with unknown type"
                );
                None
            }
        })
        .collect()
}

/// Drop repeated `(category, value)` pairs, keeping the first occurrence.
pub(crate) fn dedup_pairs(pairs: Vec<(Category, String)>) -> Vec<(Category, String)> {
    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Turn canonical pairs into items, numbering them from 1.
pub(crate) fn number_items(pairs: Vec<(Category, String)>) -> Vec<DbItem> {
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (category, value))| DbItem {
            id: Some(i as i64 + 1),
            ..DbItem::new(category, value)
        })
        .collect()
}

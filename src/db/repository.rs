//! SQLite implementation of the repository contract.
//!
//! Unlike the spreadsheet backend every mutation runs inside a transaction.

use super::log::write_log;
use super::pool::DbPool;
use super::queries;
use crate::errors::AppResult;
use crate::models::{Category, DbItem, TimeEntry};
use crate::repository::{Repository, dedup_pairs, normalize_incoming};
use chrono::{DateTime, Local, NaiveDate};

pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::new(path)?,
        })
    }

    pub fn in_memory() -> AppResult<Self> {
        Ok(Self {
            pool: DbPool::in_memory()?,
        })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {
    fn get_time_entries(&self, date: NaiveDate) -> AppResult<Vec<TimeEntry>> {
        queries::load_entries_by_date(&self.pool.conn, date)
    }

    fn save_time_entries(
        &self,
        date: NaiveDate,
        entries: &[TimeEntry],
    ) -> AppResult<DateTime<Local>> {
        let now = Local::now();
        let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();

        let tx = self.pool.conn.unchecked_transaction()?;
        queries::delete_entries_by_date(&tx, date)?;
        for entry in entries {
            queries::insert_entry(&tx, date, entry, &stamp)?;
        }
        write_log(
            &tx,
            "save_entries",
            &date.to_string(),
            &format!("{} entries saved", entries.len()),
        )?;
        tx.commit()?;

        Ok(now)
    }

    fn get_db_items(&self) -> AppResult<Vec<DbItem>> {
        let rows = queries::load_items(&self.pool.conn)?;

        let mut groups = std::collections::HashMap::new();
        let pairs: Vec<(Category, String)> = rows
            .into_iter()
            .filter_map(|(item_type, value, group)| {
                let c = Category::normalize(&item_type)?;
                if let Some(g) = group {
                    groups.entry((c, value.clone())).or_insert(g);
                }
                Some((c, value))
            })
            .collect();

        Ok(dedup_pairs(pairs)
            .into_iter()
            .enumerate()
            .map(|(i, (c, value))| DbItem {
                id: Some(i as i64 + 1),
                group: groups.remove(&(c, value.clone())),
                ..DbItem::new(c, value)
            })
            .collect())
    }

    fn save_db_items(&self, items: &[DbItem]) -> AppResult<()> {
        let tx = self.pool.conn.unchecked_transaction()?;
        let mut inserted = 0;
        for (category, value) in dedup_pairs(normalize_incoming(items)) {
            let group = items
                .iter()
                .find(|i| i.value == value && i.category() == Some(category))
                .and_then(|i| i.group.as_deref());
            if queries::insert_item(&tx, category, &value, group)? {
                inserted += 1;
            }
        }
        write_log(
            &tx,
            "save_items",
            "db_items",
            &format!("{} of {} items added", inserted, items.len()),
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete_db_items(&self, items: &[DbItem]) -> AppResult<()> {
        let tx = self.pool.conn.unchecked_transaction()?;
        let mut removed = 0;
        for item in items {
            if let Some(category) = item.category() {
                removed += queries::delete_item(&tx, category, &item.value)?;
            }
        }
        write_log(
            &tx,
            "delete_items",
            "db_items",
            &format!("{} items removed", removed),
        )?;
        tx.commit()?;
        Ok(())
    }
}

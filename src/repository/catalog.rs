//! The catalog sheet ("db items").
//!
//! Two physical layouts are read:
//!
//! * column-per-category: row 1 holds category labels, every non-empty cell
//!   below a recognized label is one value of that category;
//! * two-column: header `項目種別 | 項目名`, one `(type, value)` per row.
//!
//! Writes always produce the two-column layout, so a column-per-category
//! sheet is converted on the first save.

use super::codec::{CATALOG_TYPE_LABEL, CATALOG_VALUE_LABEL, catalog_header, cell_text, encode_item};
use super::sheets::SheetsRepository;
use super::{dedup_pairs, normalize_incoming, number_items};
use crate::errors::AppResult;
use crate::models::{Category, DbItem};
use crate::sheets::{A1Range, Row, SheetsApi};
use std::collections::{BTreeMap, HashSet};

const CATALOG_CELLS: &str = "A:Z";

/// Decode a catalog grid into de-duplicated canonical pairs, in sheet order.
pub fn decode_catalog(grid: &[Row]) -> Vec<(Category, String)> {
    let Some((header, body)) = grid.split_first() else {
        return Vec::new();
    };

    let mut seen: HashSet<(Category, String)> = HashSet::new();
    let mut out = Vec::new();
    let mut emit = |category: Category, value: String| {
        if seen.insert((category, value.clone())) {
            out.push((category, value));
        }
    };

    if is_two_column(header) {
        for row in body {
            let label = cell_text(row, 0);
            let value = cell_text(row, 1);
            if label.is_empty() || value.is_empty() {
                continue;
            }
            match Category::normalize(&label) {
                Some(category) => emit(category, value),
                None => tracing::debug!(item_type = %label, value = %value, "dropping catalog row with unknown type"),
            }
        }
        return out;
    }

    for col in 0..header.len() {
        let label = cell_text(header, col);
        if label.is_empty() {
            continue;
        }
        let Some(category) = Category::normalize(&label) else {
            tracing::debug!(column = col + 1, header = %label, "skipping catalog column");
            continue;
        };
        for row in body {
            let value = cell_text(row, col);
            if !value.is_empty() {
                emit(category, value);
            }
        }
    }
    out
}

fn is_two_column(header: &[serde_json::Value]) -> bool {
    cell_text(header, 0).trim() == CATALOG_TYPE_LABEL
        && cell_text(header, 1).trim() == CATALOG_VALUE_LABEL
}

/// Union of `existing` and `incoming`, grouped by category (in category
/// order) and first-seen order within a category.
pub fn merge_catalog(
    existing: Vec<(Category, String)>,
    incoming: Vec<(Category, String)>,
) -> Vec<(Category, String)> {
    let mut groups: BTreeMap<Category, Vec<String>> = BTreeMap::new();
    for (category, value) in dedup_pairs(existing.into_iter().chain(incoming).collect()) {
        groups.entry(category).or_default().push(value);
    }
    groups
        .into_iter()
        .flat_map(|(c, values)| values.into_iter().map(move |v| (c, v)))
        .collect()
}

impl<S: SheetsApi> SheetsRepository<S> {
    fn catalog_range(&self) -> AppResult<A1Range> {
        A1Range::cells(&self.catalog_sheet, CATALOG_CELLS)
    }

    /// Current catalog. A missing or empty catalog sheet is an empty catalog.
    pub(crate) fn read_catalog(&self) -> AppResult<Vec<(Category, String)>> {
        let grid = match self.api.get_values(&self.catalog_range()?) {
            Ok(grid) => grid,
            Err(e) if e.is_missing_range() => {
                tracing::debug!(sheet = %self.catalog_sheet, "no catalog sheet, catalog is empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        Ok(decode_catalog(&grid))
    }

    /// Replace the catalog sheet with header + `pairs` in two-column form.
    fn write_catalog(&self, pairs: &[(Category, String)]) -> AppResult<()> {
        self.ensure_sheet(&self.catalog_sheet)?;

        let mut rows = Vec::with_capacity(pairs.len() + 1);
        rows.push(catalog_header());
        rows.extend(pairs.iter().map(|(c, v)| encode_item(*c, v)));

        self.rewrite(
            &self.catalog_range()?,
            &A1Range::cells(&self.catalog_sheet, "A1")?,
            &rows,
        )
    }

    pub(crate) fn read_items(&self) -> AppResult<Vec<DbItem>> {
        Ok(number_items(self.read_catalog()?))
    }

    pub(crate) fn merge_items(&self, items: &[DbItem]) -> AppResult<()> {
        let existing = self.read_catalog()?;
        let before = existing.len();
        let merged = merge_catalog(existing, normalize_incoming(items));

        self.write_catalog(&merged)?;
        tracing::info!(
            sheet = %self.catalog_sheet,
            before,
            after = merged.len(),
            "saved catalog"
        );
        Ok(())
    }

    pub(crate) fn remove_items(&self, items: &[DbItem]) -> AppResult<()> {
        let doomed: HashSet<(Category, &str)> = items
            .iter()
            .filter_map(|item| item.category().map(|c| (c, item.value.as_str())))
            .collect();

        let existing = self.read_catalog()?;
        let before = existing.len();
        let remaining: Vec<(Category, String)> = existing
            .into_iter()
            .filter(|(c, v)| !doomed.contains(&(*c, v.as_str())))
            .collect();

        self.write_catalog(&remaining)?;
        tracing::info!(
            sheet = %self.catalog_sheet,
            removed = before - remaining.len(),
            remaining = remaining.len(),
            "deleted catalog items"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| json!(c)).collect()
    }

    #[test]
    fn empty_grid_is_empty_catalog() {
        assert!(decode_catalog(&[]).is_empty());
        assert!(decode_catalog(&[row(&["内容", "クライアント"])]).is_empty());
    }

    #[test]
    fn reads_column_per_category() {
        let grid = vec![
            row(&["時間", "内容", "クライアント", "謎", "task"]),
            row(&["09:00", "会議", "A社", "x", "会議"]),
            row(&["", "資料作成", "", "y"]),
            row(&["", "", "B社"]),
        ];
        let got = decode_catalog(&grid);
        assert_eq!(
            got,
            vec![
                (Category::Content, "会議".to_string()),
                (Category::Content, "資料作成".to_string()),
                (Category::Client, "A社".to_string()),
                (Category::Client, "B社".to_string()),
            ]
        );
    }

    #[test]
    fn reads_two_column_layout() {
        let grid = vec![
            row(&["項目種別", "項目名"]),
            row(&["task", "会議"]),
            row(&["content", "会議"]),
            row(&["モール別", "楽天"]),
            row(&["unknown", "x"]),
            row(&["client"]),
            row(&["", "orphan"]),
        ];
        let got = decode_catalog(&grid);
        assert_eq!(
            got,
            vec![
                (Category::Content, "会議".to_string()),
                (Category::With, "楽天".to_string()),
            ]
        );
    }

    #[test]
    fn merge_groups_by_category() {
        let existing = vec![
            (Category::Client, "A社".to_string()),
            (Category::Content, "会議".to_string()),
        ];
        let incoming = vec![
            (Category::Content, "会議".to_string()),
            (Category::Content, "資料作成".to_string()),
            (Category::Client, "B社".to_string()),
        ];
        assert_eq!(
            merge_catalog(existing, incoming),
            vec![
                (Category::Content, "会議".to_string()),
                (Category::Content, "資料作成".to_string()),
                (Category::Client, "A社".to_string()),
                (Category::Client, "B社".to_string()),
            ]
        );
    }
}

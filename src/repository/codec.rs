//! Conversion between raw cell rows and typed records.
//!
//! Decoding never fails: absent, null or oddly-typed cells degrade to empty
//! strings. Column order is fixed; the header rows below must change
//! together with the encoders.

use crate::models::{Category, TimeEntry};
use crate::sheets::Row;
use serde_json::Value;

/// Header of the first date-sheet column.
pub const TIME_LABEL: &str = "時間";

/// Two-column catalog header.
pub const CATALOG_TYPE_LABEL: &str = "項目種別";
pub const CATALOG_VALUE_LABEL: &str = "項目名";

/// Textual form of the cell at `index`, or `""` if there is none.
pub fn cell_text(row: &[Value], index: usize) -> String {
    match row.get(index) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if let Some(f) = n.as_f64()
        && !n.is_i64()
        && !n.is_u64()
        && f.is_finite()
        && f.fract() == 0.0
        && f.abs() < 1e15
    {
        return format!("{}", f as i64);
    }
    n.to_string()
}

pub fn entry_header() -> Row {
    std::iter::once(TIME_LABEL)
        .chain(Category::ALL.iter().map(|c| c.label()))
        .map(|s| Value::String(s.to_string()))
        .collect()
}

pub fn encode_entry(entry: &TimeEntry) -> Row {
    std::iter::once(entry.time.as_str())
        .chain(Category::ALL.iter().map(|c| entry.field(*c)))
        .map(|s| Value::String(s.to_string()))
        .collect()
}

/// Decode one data row of a date sheet. Returns `None` when a required
/// field (`time`, `content`) is empty.
pub fn decode_entry(row: &[Value]) -> Option<TimeEntry> {
    let mut entry = TimeEntry {
        time: cell_text(row, 0),
        ..Default::default()
    };
    for (i, category) in Category::ALL.iter().enumerate() {
        *entry.field_mut(*category) = cell_text(row, i + 1);
    }
    entry.is_complete().then_some(entry)
}

pub fn catalog_header() -> Row {
    vec![
        Value::String(CATALOG_TYPE_LABEL.to_string()),
        Value::String(CATALOG_VALUE_LABEL.to_string()),
    ]
}

pub fn encode_item(category: Category, value: &str) -> Row {
    vec![
        Value::String(category.key().to_string()),
        Value::String(value.to_string()),
    ]
}

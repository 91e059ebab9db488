//! Access to a remote spreadsheet as a grid store.
//!
//! `SheetsApi` is the narrow set of calls the repositories need. The HTTP
//! implementation talks to the Google Sheets v4 REST API; the in-memory one
//! reproduces the same observable behavior for tests and dry runs.

pub mod http;
pub mod memory;
pub mod range;

pub use http::HttpSheets;
pub use memory::MemorySheets;
pub use range::A1Range;

use crate::errors::AppResult;
use serde_json::Value;

/// A row of loosely-typed cells as returned by the remote side.
pub type Row = Vec<Value>;

pub trait SheetsApi {
    /// Titles of all sheets in the spreadsheet, in tab order.
    fn sheet_titles(&self) -> AppResult<Vec<String>>;

    /// Values of `range`. Trailing empty rows and cells are not returned.
    fn get_values(&self, range: &A1Range) -> AppResult<Vec<Row>>;

    fn clear_values(&self, range: &A1Range) -> AppResult<()>;

    /// Write `rows` starting at the top-left corner of `range`, verbatim.
    fn update_values(&self, range: &A1Range, rows: &[Row]) -> AppResult<()>;

    fn add_sheet(&self, title: &str) -> AppResult<()>;
}

impl<T: SheetsApi + ?Sized> SheetsApi for &T {
    fn sheet_titles(&self) -> AppResult<Vec<String>> {
        (**self).sheet_titles()
    }
    fn get_values(&self, range: &A1Range) -> AppResult<Vec<Row>> {
        (**self).get_values(range)
    }
    fn clear_values(&self, range: &A1Range) -> AppResult<()> {
        (**self).clear_values(range)
    }
    fn update_values(&self, range: &A1Range, rows: &[Row]) -> AppResult<()> {
        (**self).update_values(range, rows)
    }
    fn add_sheet(&self, title: &str) -> AppResult<()> {
        (**self).add_sheet(title)
    }
}

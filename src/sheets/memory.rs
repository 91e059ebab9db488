//! In-memory spreadsheet with the same observable behavior as the remote
//! API: unknown sheets fail with a range-parse error, reads drop trailing
//! blank cells and rows, `RAW` writes store values verbatim.

use super::{A1Range, Row, SheetsApi};
use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Remote operations, recorded in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Titles,
    Get,
    Clear,
    Update,
    AddSheet,
}

#[derive(Default)]
pub struct MemorySheets {
    sheets: RefCell<Vec<(String, Vec<Row>)>>,
    failures: RefCell<HashMap<Op, usize>>,
    calls: RefCell<Vec<Op>>,
}

fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn trim_row(mut row: Row) -> Row {
    while row.last().is_some_and(is_blank) {
        row.pop();
    }
    row
}

fn trim_grid(mut rows: Vec<Row>) -> Vec<Row> {
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a sheet with initial content.
    pub fn with_sheet(self, title: &str, rows: Vec<Row>) -> Self {
        self.sheets.borrow_mut().push((title.to_string(), rows));
        self
    }

    /// Make the next `times` calls of `op` fail with a 503.
    pub fn fail(&self, op: Op, times: usize) {
        self.failures.borrow_mut().insert(op, times);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.borrow().clone()
    }

    /// Current content of a sheet as the API would return it for the whole
    /// sheet, or `None` if it does not exist.
    pub fn snapshot(&self, title: &str) -> Option<Vec<Row>> {
        self.sheets
            .borrow()
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, rows)| trim_grid(rows.iter().cloned().map(trim_row).collect()))
    }

    fn enter(&self, op: Op) -> AppResult<()> {
        self.calls.borrow_mut().push(op);
        let mut failures = self.failures.borrow_mut();
        if let Some(n) = failures.get_mut(&op)
            && *n > 0
        {
            *n -= 1;
            return Err(AppError::SheetsApi {
                status: 503,
                message: format!("The service is currently unavailable ({:?})", op),
            });
        }
        Ok(())
    }

    fn with_grid<T>(
        &self,
        range: &A1Range,
        f: impl FnOnce(&mut Vec<Row>) -> T,
    ) -> AppResult<T> {
        let mut sheets = self.sheets.borrow_mut();
        let (_, grid) = sheets
            .iter_mut()
            .find(|(t, _)| *t == range.sheet)
            .ok_or_else(|| AppError::SheetsApi {
                status: 400,
                message: format!("Unable to parse range: {}", range),
            })?;
        Ok(f(grid))
    }
}

impl SheetsApi for MemorySheets {
    fn sheet_titles(&self) -> AppResult<Vec<String>> {
        self.enter(Op::Titles)?;
        Ok(self.sheets.borrow().iter().map(|(t, _)| t.clone()).collect())
    }

    fn get_values(&self, range: &A1Range) -> AppResult<Vec<Row>> {
        self.enter(Op::Get)?;
        self.with_grid(range, |grid| {
            let first_row = range.first_row() - 1;
            let last_row = range.last_row().unwrap_or(usize::MAX);
            let first_col = range.first_col();
            let last_col = range.last_col().unwrap_or(usize::MAX);

            let rows = grid
                .iter()
                .enumerate()
                .skip(first_row)
                .take_while(|(i, _)| *i < last_row)
                .map(|(_, row)| {
                    let cells = row
                        .iter()
                        .enumerate()
                        .skip(first_col)
                        .take_while(|(c, _)| *c <= last_col)
                        .map(|(_, v)| v.clone())
                        .collect();
                    trim_row(cells)
                })
                .collect();
            trim_grid(rows)
        })
    }

    fn clear_values(&self, range: &A1Range) -> AppResult<()> {
        self.enter(Op::Clear)?;
        self.with_grid(range, |grid| {
            let first_row = range.first_row() - 1;
            let last_row = range.last_row().unwrap_or(usize::MAX);
            let first_col = range.first_col();
            let last_col = range.last_col().unwrap_or(usize::MAX);

            for (i, row) in grid.iter_mut().enumerate() {
                if i < first_row || i >= last_row {
                    continue;
                }
                for (c, cell) in row.iter_mut().enumerate() {
                    if c >= first_col && c <= last_col {
                        *cell = Value::Null;
                    }
                }
            }
        })
    }

    fn update_values(&self, range: &A1Range, rows: &[Row]) -> AppResult<()> {
        self.enter(Op::Update)?;
        self.with_grid(range, |grid| {
            let top = range.first_row() - 1;
            let left = range.first_col();

            for (r, values) in rows.iter().enumerate() {
                let target = top + r;
                if grid.len() <= target {
                    grid.resize(target + 1, Vec::new());
                }
                let row = &mut grid[target];
                if row.len() < left + values.len() {
                    row.resize(left + values.len(), Value::Null);
                }
                for (c, v) in values.iter().enumerate() {
                    row[left + c] = v.clone();
                }
            }
        })
    }

    fn add_sheet(&self, title: &str) -> AppResult<()> {
        self.enter(Op::AddSheet)?;
        let mut sheets = self.sheets.borrow_mut();
        if sheets.iter().any(|(t, _)| t == title) {
            return Err(AppError::SheetsApi {
                status: 400,
                message: format!(
                    "Invalid requests[0].addSheet: A sheet with the name \"{}\" already exists.",
                    title
                ),
            });
        }
        sheets.push((title.to_string(), Vec::new()));
        Ok(())
    }
}

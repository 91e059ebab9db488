//! A1 notation for addressing a rectangle of a named sheet.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static A1_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:'((?:[^']|'')+)'|([^!']+))(?:!([A-Z]+)(\d*)(?::([A-Z]+)(\d*))?)?$")
        .expect("static A1 pattern")
});

/// One corner of a range. `row` is 1-based; `None` means "unbounded" (a
/// whole-column reference such as `A:H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub col: usize,
    pub row: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start: Option<CellRef>,
    pub end: Option<CellRef>,
}

impl A1Range {
    /// A rectangle of `sheet` given in plain A1 form, e.g. `"A2:H"` or `"A1"`.
    pub fn cells(sheet: &str, cells: &str) -> AppResult<Self> {
        Self::parse(&format!("{}!{}", quote(sheet), cells))
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        let caps = A1_RE
            .captures(s.trim())
            .ok_or_else(|| AppError::InvalidRange(s.to_string()))?;

        let sheet = match (caps.get(1), caps.get(2)) {
            (Some(q), _) => q.as_str().replace("''", "'"),
            (None, Some(p)) => p.as_str().to_string(),
            _ => return Err(AppError::InvalidRange(s.to_string())),
        };

        let invalid = || AppError::InvalidRange(s.to_string());
        let corner = |col: Option<regex::Match>,
                      row: Option<regex::Match>|
         -> AppResult<Option<CellRef>> {
            let Some(col) = col else {
                return Ok(None);
            };
            let row = match row.map(|m| m.as_str()).filter(|r| !r.is_empty()) {
                Some(r) => Some(r.parse::<usize>().map_err(|_| invalid())?),
                None => None,
            };
            Ok(Some(CellRef {
                col: column_index(col.as_str()).ok_or_else(invalid)?,
                row,
            }))
        };

        let start = corner(caps.get(3), caps.get(4))?;
        let end = corner(caps.get(5), caps.get(6))?;

        // rows are 1-based
        if [start, end].iter().flatten().any(|c| c.row == Some(0)) {
            return Err(AppError::InvalidRange(s.to_string()));
        }

        Ok(Self { sheet, start, end })
    }

    /// First row covered (1-based).
    pub fn first_row(&self) -> usize {
        self.start.and_then(|c| c.row).unwrap_or(1)
    }

    /// Last row covered, `None` when unbounded.
    pub fn last_row(&self) -> Option<usize> {
        match (self.start, self.end) {
            (_, Some(end)) => end.row,
            (Some(start), None) => start.row,
            (None, None) => None,
        }
    }

    pub fn first_col(&self) -> usize {
        self.start.map(|c| c.col).unwrap_or(0)
    }

    /// Last column covered, `None` when unbounded.
    pub fn last_col(&self) -> Option<usize> {
        match (self.start, self.end) {
            (_, Some(end)) => Some(end.col),
            (Some(start), None) => Some(start.col),
            (None, None) => None,
        }
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.sheet))?;
        if let Some(start) = self.start {
            write!(f, "!{}", cell_ref(start))?;
            if let Some(end) = self.end {
                write!(f, ":{}", cell_ref(end))?;
            }
        }
        Ok(())
    }
}

fn quote(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

fn cell_ref(c: CellRef) -> String {
    match c.row {
        Some(r) => format!("{}{}", column_letters(c.col), r),
        None => column_letters(c.col),
    }
}

/// `A` → 0, `Z` → 25, `AA` → 26. `None` for an empty or oversized name.
pub fn column_index(letters: &str) -> Option<usize> {
    letters
        .bytes()
        .try_fold(0usize, |acc, b| {
            acc.checked_mul(26)?.checked_add((b - b'A' + 1) as usize)
        })?
        .checked_sub(1)
}

/// 0 → `A`, 26 → `AA`.
pub fn column_letters(mut index: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

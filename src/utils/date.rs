use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` date (or the word `today`).
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    if !ISO_DATE.is_match(s) {
        return Err(AppError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

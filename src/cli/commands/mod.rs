pub mod check;
pub mod config;
pub mod entries;
pub mod import;
pub mod init;
pub mod items;
pub mod log;

use crate::errors::AppResult;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};

/// Read and parse a JSON document from `path`, or from stdin when `path`
/// is `-`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &str) -> AppResult<T> {
    let text = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

use super::read_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::DbItem;
use crate::repository;
use crate::ui::messages::{success, warning};
use serde::Deserialize;

#[derive(Deserialize)]
struct ImportFile {
    #[serde(default)]
    db_items: Vec<DbItem>,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let data: ImportFile = read_json(file)?;
        if data.db_items.is_empty() {
            warning(format!("No db_items found in {}", file));
            return Ok(());
        }

        let unknown = data
            .db_items
            .iter()
            .filter(|i| i.category().is_none())
            .count();
        if unknown > 0 {
            warning(format!("{} items have an unknown type and are skipped", unknown));
        }

        let repo = repository::open(cfg)?;
        repo.save_db_items(&data.db_items)?;
        success(format!(
            "Imported {} items from {}",
            data.db_items.len() - unknown,
            file
        ));
    }
    Ok(())
}

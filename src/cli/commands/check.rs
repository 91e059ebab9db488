use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{Category, CatalogView};
use crate::repository;
use crate::ui::messages::info;

/// Fetch the catalog once and print totals, as a quick connectivity and
/// layout check.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Check = cmd {
        let repo = repository::open(cfg)?;
        let items = repo.get_db_items()?;
        let view = CatalogView::from_items(&items);

        info(format!("Catalog items: {}", items.len()));
        for category in Category::ALL {
            println!("  {:<8} {}", category.key(), view.values(category).len());
        }
    }
    Ok(())
}

use super::read_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{CatalogView, DbItem};
use crate::repository;
use crate::ui::messages::{info, success};
use crate::ui::print_json;
use crate::utils::table::Table;
use serde::Deserialize;

/// Item files are either a plain array or an export envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsPayload {
    List(Vec<DbItem>),
    Export { db_items: Vec<DbItem> },
}

impl ItemsPayload {
    fn into_items(self) -> Vec<DbItem> {
        match self {
            ItemsPayload::List(items) | ItemsPayload::Export { db_items: items } => items,
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Items { json, grouped } => {
            let repo = repository::open(cfg)?;
            let items = repo.get_db_items()?;

            match (*json, *grouped) {
                (true, true) => print_json(&CatalogView::from_items(&items))?,
                (true, false) => print_json(&items)?,
                (false, _) if items.is_empty() => info("The catalog is empty"),
                (false, true) => {
                    let view = CatalogView::from_items(&items);
                    for category in crate::models::Category::ALL {
                        let values = view.values(category);
                        if !values.is_empty() {
                            println!("{} ({}): {}", category.label(), category, values.join(", "));
                        }
                    }
                }
                (false, false) => {
                    let mut table = Table::new(["#", "Type", "Value"]);
                    for item in &items {
                        table.add_row(vec![
                            item.id.map(|i| i.to_string()).unwrap_or_default(),
                            item.item_type.clone(),
                            item.value.clone(),
                        ]);
                    }
                    print!("{}", table.render());
                }
            }
        }
        Commands::ItemsSave { file } => {
            let items = read_json::<ItemsPayload>(file)?.into_items();
            let repo = repository::open(cfg)?;
            repo.save_db_items(&items)?;
            success(format!("Merged {} items into the catalog", items.len()));
        }
        Commands::ItemsDelete { file } => {
            let items = read_json::<ItemsPayload>(file)?.into_items();
            let repo = repository::open(cfg)?;
            repo.delete_db_items(&items)?;
            success(format!("Removed {} items from the catalog", items.len()));
        }
        _ => {}
    }
    Ok(())
}

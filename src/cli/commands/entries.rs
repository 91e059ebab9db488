use super::read_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{Category, TimeEntry, number_entries};
use crate::repository;
use crate::ui::messages::{info, success, warning};
use crate::ui::print_json;
use crate::utils::date::parse_date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Get { date, json } => {
            let date = parse_date(date)?;
            let repo = repository::open(cfg)?;
            let entries = number_entries(repo.get_time_entries(date)?);

            if *json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                info(format!("No entries for {}", date));
                return Ok(());
            }

            let mut table = Table::new(
                ["#", "時間"]
                    .into_iter()
                    .chain(Category::ALL.iter().map(|c| c.label())),
            );
            for n in &entries {
                let mut row = vec![n.id.to_string(), n.entry.time.clone()];
                row.extend(Category::ALL.iter().map(|c| n.entry.field(*c).to_string()));
                table.add_row(row);
            }
            print!("{}", table.render());
        }
        Commands::Save { date, file } => {
            let date = parse_date(date)?;
            let entries: Vec<TimeEntry> = read_json(file)?;

            let incomplete = entries.iter().filter(|e| !e.is_complete()).count();
            if incomplete > 0 {
                warning(format!(
                    "{} entries without time or content will not be read back",
                    incomplete
                ));
            }

            let repo = repository::open(cfg)?;
            let at = repo.save_time_entries(date, &entries)?;
            success(format!(
                "Saved {} entries for {} at {}",
                entries.len(),
                date,
                at.format("%Y/%m/%d %H:%M:%S")
            ));
        }
        _ => {}
    }
    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::{Backend, Config};
use crate::db::log::write_log;
use crate::db::repository::SqliteRepository;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This writes:
///  - the configuration file (effective settings, access token excluded)
///  - the SQLite schema, when the sqlite backend is selected
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Init { force } = cmd else {
        return Ok(());
    };

    let path = Config::config_file();
    if path.exists() && !*force {
        info(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    } else {
        let mut to_save = cfg.clone();
        to_save.sheets.access_token.clear();
        to_save.save(&path)?;
        success(format!("Config file: {}", path.display()));
    }

    match cfg.backend {
        Backend::Sqlite => {
            let repo = SqliteRepository::open(&cfg.database)?;
            if let Err(e) = write_log(
                &repo.pool().conn,
                "init",
                &cfg.database,
                "Database initialized",
            ) {
                tracing::warn!(error = %e, "failed to write internal log");
            }
            success(format!("Database initialized at {}", cfg.database));
        }
        Backend::Sheets => {
            info(format!(
                "Backend: Google Sheets (spreadsheet '{}', catalog sheet '{}')",
                cfg.sheets.spreadsheet_id, cfg.sheets.catalog_sheet
            ));
        }
    }

    Ok(())
}

use crate::cli::parser::Commands;
use crate::config::{Backend, Config};
use crate::db::log::recent_log;
use crate::db::repository::SqliteRepository;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { limit } = cmd {
        if cfg.backend != Backend::Sqlite {
            return Err(AppError::Config(
                "the internal log is only kept by the sqlite backend".into(),
            ));
        }

        let repo = SqliteRepository::open(&cfg.database)?;
        let lines = recent_log(&repo.pool().conn, *limit)?;
        if lines.is_empty() {
            info("The log is empty");
        }
        for (date, operation, message) in lines {
            println!("{}  {:<14} {}", date, operation, message);
        }
    }
    Ok(())
}

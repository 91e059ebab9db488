//! timeslice library root.
//! Exposes the CLI parser, the high-level run() function and the storage layers.

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod repository;
pub mod sheets;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands::*;

    match &cli.command {
        Commands::Init { .. } => init::handle(&cli.command, cfg),
        Commands::Config { .. } => config::handle(&cli.command, cfg),
        Commands::Get { .. } | Commands::Save { .. } => entries::handle(&cli.command, cfg),
        Commands::Items { .. } | Commands::ItemsSave { .. } | Commands::ItemsDelete { .. } => {
            items::handle(&cli.command, cfg)
        }
        Commands::Import { .. } => import::handle(&cli.command, cfg),
        Commands::Check => check::handle(&cli.command, cfg),
        Commands::Log { .. } => log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    tracing::debug!(backend = ?cfg.backend, database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg)
}

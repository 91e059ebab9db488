use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config, path } = cmd {
        if *path {
            println!("{}", Config::config_file().display());
        }
        if *print_config || !*path {
            print!("{}", cfg.to_display_yaml()?);
        }
    }
    Ok(())
}

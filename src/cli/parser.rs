use crate::config::Backend;
use clap::{Parser, Subcommand};

/// Command-line interface definition for timeslice
#[derive(Parser)]
#[command(
    name = "timeslice",
    version = env!("CARGO_PKG_VERSION"),
    about = "Time-slice log stored in a Google Sheets spreadsheet or a SQLite database",
    long_about = None
)]
pub struct Cli {
    /// Override the storage backend from the configuration
    #[arg(global = true, long = "backend", value_enum)]
    pub backend: Option<Backend>,

    /// Override database path (sqlite backend)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file and initialize the database
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "path", help = "Print the configuration file path")]
        path: bool,
    },

    /// Show the entries of a day
    Get {
        /// Date of the day (YYYY-MM-DD or "today")
        date: String,

        #[arg(long, help = "Print numbered entries as JSON")]
        json: bool,
    },

    /// Replace the entries of a day with the content of a JSON file
    Save {
        /// Date of the day (YYYY-MM-DD or "today")
        date: String,

        #[arg(long, value_name = "FILE", help = "JSON array of entries ('-' for stdin)")]
        file: String,
    },

    /// Show the catalog of dropdown values
    Items {
        #[arg(long, help = "Print as JSON")]
        json: bool,

        #[arg(long, help = "Group values per category")]
        grouped: bool,
    },

    /// Merge items from a JSON file into the catalog
    ItemsSave {
        #[arg(long, value_name = "FILE", help = "JSON array of items ('-' for stdin)")]
        file: String,
    },

    /// Remove items listed in a JSON file from the catalog
    ItemsDelete {
        #[arg(long, value_name = "FILE", help = "JSON array of items ('-' for stdin)")]
        file: String,
    },

    /// Import catalog items from an export file ({"db_items": [...]})
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Fetch the catalog and report counts per category
    Check,

    /// Print the internal log (sqlite backend)
    Log {
        #[arg(long, default_value_t = 20, help = "Number of lines")]
        limit: usize,
    },
}

use crate::errors::{AppError, AppResult};
use crate::repository::sheets::DEFAULT_CATALOG_SHEET;
use crate::sheets::http::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "TIMESLICE_CONFIG";
pub const SPREADSHEET_ID_ENV: &str = "SPREADSHEET_ID";
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";
pub const API_BASE_ENV: &str = "SHEETS_API_BASE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sheets,
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: String,
    /// OAuth bearer token with the spreadsheets scope. Usually left empty
    /// in the file and supplied through `GOOGLE_ACCESS_TOKEN`, e.g.
    /// `GOOGLE_ACCESS_TOKEN=$(gcloud auth print-access-token)`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_catalog_sheet")]
    pub catalog_sheet: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_rewrite_attempts")]
    pub rewrite_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub sheets: SheetsConfig,
}

fn default_backend() -> Backend {
    Backend::Sheets
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_catalog_sheet() -> String {
    DEFAULT_CATALOG_SHEET.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_rewrite_attempts() -> u32 {
    1
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            access_token: String::new(),
            api_base: default_api_base(),
            catalog_sheet: default_catalog_sheet(),
            timeout_secs: default_timeout_secs(),
            rewrite_attempts: default_rewrite_attempts(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database: default_database(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".timeslice")
    }

    /// Return the full path of the config file, honoring `TIMESLICE_CONFIG`
    pub fn config_file() -> PathBuf {
        match env::var_os(CONFIG_ENV) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => Self::config_dir().join("timeslice.conf"),
        }
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timeslice.sqlite")
    }

    /// Load configuration from file (defaults if not found), then apply
    /// environment overrides.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    fn apply_env(&mut self) {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        if let Some(id) = var(SPREADSHEET_ID_ENV) {
            self.sheets.spreadsheet_id = id;
        }
        if let Some(token) = var(ACCESS_TOKEN_ENV) {
            self.sheets.access_token = token;
        }
        if let Some(base) = var(API_BASE_ENV) {
            self.sheets.api_base = base;
        }
    }

    /// Write the configuration file, creating its directory.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Configuration as YAML, with the access token masked.
    pub fn to_display_yaml(&self) -> AppResult<String> {
        let mut shown = self.clone();
        if !shown.sheets.access_token.is_empty() {
            shown.sheets.access_token = "********".to_string();
        }
        Ok(serde_yaml::to_string(&shown)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_gets_defaults() {
        let cfg: Config = serde_yaml::from_str("backend: sqlite\ndatabase: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.backend, Backend::Sqlite);
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.sheets.catalog_sheet, "業務データベース");
        assert_eq!(cfg.sheets.rewrite_attempts, 1);
        assert_eq!(cfg.sheets.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn missing_file_is_default() {
        let path = env::temp_dir().join("timeslice_config_does_not_exist.conf");
        fs::remove_file(&path).ok();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.backend, Backend::Sheets);
    }

    #[test]
    fn token_is_masked_for_display() {
        let mut cfg = Config::default();
        cfg.sheets.access_token = "secret".into();
        let shown = cfg.to_display_yaml().unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("********"));
    }
}

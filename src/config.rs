//! TOML configuration.
//!
//! ```toml
//! [db]
//! backend = "sqlite"            # "sqlite" | "memory"
//! path = "./data/catalog.sqlite"
//!
//! [server]
//! bind = "127.0.0.1:8000"
//! log_filter = "ar15_catalog=info,tower_http=info"
//! ```
//!
//! Every key has a default, so an empty file is a valid configuration.
//! `RUST_LOG`, when set, takes precedence over `server.log_filter`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_db_path(),
        }
    }
}

fn default_backend() -> Backend {
    Backend::Sqlite
}
fn default_db_path() -> PathBuf {
    PathBuf::from("./data/catalog.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}
fn default_log_filter() -> String {
    "ar15_catalog=info,tower_http=info".to_string()
}

impl Config {
    /// Configuration with a SQLite database at `path`.
    pub fn with_sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            db: DbConfig {
                backend: Backend::Sqlite,
                path: path.into(),
            },
            server: ServerConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    if config.db.backend == Backend::Sqlite && config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must be set when db.backend is 'sqlite'");
    }

    Ok(config)
}

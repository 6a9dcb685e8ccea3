//! CLI command implementations
//!
//! `serve` is the only command that touches the store: it loads the
//! persisted collection once, hands the owned store to the HTTP adapter,
//! and blocks on the server.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::http_server::config::{default_host, default_port};
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::store::{JsonFilePersistence, RecordStore, StringRecord};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted collection (required)
    pub data_dir: String,

    /// Host to bind to (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (default: any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// HTTP settings, with an optional port override
    pub fn http_config(&self, port: Option<u16>) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: port.unwrap_or(self.port),
            cors_origins: self.cors_origins.clone(),
        }
    }
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Analyze { value } => analyze(&value),
    }
}

/// Write a default config file and create its data directory.
///
/// Refuses to overwrite an existing config file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path));
    }

    let config = Config::default();
    fs::create_dir_all(config.data_path()).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create data directory {}: {}",
            config.data_dir, e
        ))
    })?;

    fs::write(config_path, serde_json::to_string_pretty(&config)?)?;

    write_response(&serde_json::json!({
        "initialized": true,
        "config": config_path.display().to_string(),
    }))
}

/// Load the persisted store and serve the HTTP API.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let state = Arc::new(open_state(&config)?);

    Logger::info(
        "STORE_LOADED",
        &[
            ("data_dir", config.data_dir.as_str()),
            ("records", state.metrics.snapshot().records.to_string().as_str()),
        ],
    );

    let server = HttpServer::new(config.http_config(port), state);
    Logger::info("SERVER_STARTING", &[("addr", server.socket_addr().as_str())]);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Open the JSON persistence under `data_dir` and load the store from it.
pub fn open_state(config: &Config) -> CliResult<AppState> {
    let persistence = JsonFilePersistence::open(config.data_path())
        .map_err(|e| CliError::boot_failed(format!("Failed to open data directory: {}", e)))?;
    let store = RecordStore::open(Box::new(persistence))?;
    Ok(AppState::new(store)?)
}

/// Print the record `value` would be stored as.
pub fn analyze(value: &str) -> CliResult<()> {
    write_response(&StringRecord::new(value, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("strindex.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_config_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"data_dir": "/var/lib/strindex"}"#);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, "/var/lib/strindex");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_load_config_requires_data_dir() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"port": 8080}"#);
        assert!(Config::load(&path).is_err());

        let path = write_config(&tmp, r#"{"data_dir": "  "}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_load_config_rejects_port_zero() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"data_dir": "d", "port": 0}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(&tmp.path().join("nope.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }

    #[test]
    fn test_port_override() {
        let config = Config::default();
        assert_eq!(config.http_config(None).port, 8080);
        assert_eq!(config.http_config(Some(9000)).port, 9000);
    }

    #[test]
    fn test_open_state_loads_persisted_records() {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            data_dir: tmp.path().join("data").display().to_string(),
            ..Default::default()
        };

        let state = open_state(&config).unwrap();
        state.store.insert("racecar").unwrap();
        drop(state);

        let reopened = open_state(&config).unwrap();
        assert_eq!(reopened.store.get("racecar").unwrap().value, "racecar");
        assert_eq!(reopened.metrics.snapshot().records, 1);
    }
}

//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `server.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ListenConfig: where the http listener binds (default 0.0.0.0:5000).
//!     - LoggingConfig: the append-only report log and the tracing level.
//!     - ConsoleConfig: toggles for the per-report console block.
//!
//! ==============================================================================

use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// append-only report log, created at startup if absent
    pub file: PathBuf,
    /// tracing filter used when RUST_LOG is unset
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// print the human-readable block for every accepted report
    pub enabled: bool,
    /// follow the block with the compact one-line rendering
    pub raw_dump: bool,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { file: PathBuf::from("system_reports.log"), level: "info".to_string() }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true, raw_dump: true }
    }
}

impl ServerConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load with default fallback
    pub fn load_or_default() -> Self {
        let paths = [
            PathBuf::from("config").join("server.toml"),
            PathBuf::from("..").join("config").join("server.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        println!("[CONFIG] Loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        println!("[CONFIG] Warning: Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        println!("[CONFIG] Warning: No config file found - using defaults");
        Self::default()
    }

    /// reject values the listener or the log sink cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port must be greater than 0");
        }
        if self.logging.file.as_os_str().is_empty() {
            anyhow::bail!("logging.file must not be empty");
        }
        Ok(())
    }

    /// parse `host:port` into the address the listener binds
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.server.host, self.server.port))
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("┌─────────────────────────────────────────┐");
        println!("│          SERVER CONFIGURATION           │");
        println!("├─────────────────────────────────────────┤");
        println!("│ Listen: {}:{}", self.server.host, self.server.port);
        println!("│ Report Log: {}", self.logging.file.display());
        println!("│ Log Level: {}", self.logging.level);
        println!("│ Console Blocks: {}", if self.console.enabled { "on" } else { "off" });
        println!("└─────────────────────────────────────────┘");
    }
}

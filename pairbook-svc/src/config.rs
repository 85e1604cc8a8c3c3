//! Service configuration
//!
//! Each setting resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (folded into clap via `env = ...`)
//! 3. TOML config file (`~/.config/pairbook/config.toml`)
//! 4. Compiled default (fallback)

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_PORT: u16 = 5870;

/// Command-line arguments (environment variables fill absent flags)
#[derive(Debug, Default, Parser)]
#[command(name = "pairbook-svc", about = "Track pairing service")]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "PAIRBOOK_PORT")]
    pub port: Option<u16>,

    /// Canonical store file path
    #[arg(long, env = "PAIRBOOK_STORE")]
    pub store: Option<PathBuf>,

    /// Base URL of the catalog service
    #[arg(long, env = "PAIRBOOK_CATALOG")]
    pub catalog_url: Option<String>,
}

/// Optional TOML config file contents
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub store: Option<PathBuf>,
    pub catalog_url: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    pub store_path: PathBuf,
    /// `None` disables the playlist endpoints
    pub catalog_url: Option<String>,
}

impl ServiceConfig {
    /// Resolve configuration from CLI/env args, the TOML config file, and
    /// compiled defaults, in that order.
    pub fn resolve(cli: Cli) -> Self {
        Self::resolve_from(cli, load_file_config())
    }

    fn resolve_from(cli: Cli, file: FileConfig) -> Self {
        Self {
            port: cli.port.or(file.port).unwrap_or(DEFAULT_PORT),
            store_path: cli
                .store
                .or(file.store)
                .unwrap_or_else(default_store_path),
            catalog_url: cli.catalog_url.or(file.catalog_url),
        }
    }
}

fn load_file_config() -> FileConfig {
    let Some(path) = dirs::config_dir().map(|d| d.join("pairbook").join("config.toml")) else {
        return FileConfig::default();
    };
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return FileConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            debug!("ignoring malformed config file {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

/// OS-dependent default store location, e.g. `~/.local/share/pairbook/pairs.json`
fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pairbook")
        .join("pairs.json")
}

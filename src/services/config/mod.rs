// Configuration service
// Reads and writes config.toml in the platform config directory

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::models::config::AppConfig;

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "timetable.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KidsTimetable", "KidsTimetable")
}

/// Location of `config.toml`, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Reads a config file. Out-of-range values are replaced with defaults.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let mut config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    for field in config.sanitize() {
        log::warn!("Invalid value for '{}' in {}, using default", field, path.display());
    }

    Ok(config)
}

pub fn save_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;
    Ok(())
}

/// Loads the config at `path`, writing defaults when the file is missing.
/// A broken file never stops the app: defaults are used instead.
pub fn load_or_create_at(path: &Path) -> AppConfig {
    if !path.exists() {
        let config = AppConfig::default();
        match save_to(path, &config) {
            Ok(()) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Failed to write default config: {:#}", e),
        }
        return config;
    }

    match load_from(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{:#}, using defaults", e);
            AppConfig::default()
        }
    }
}

pub fn load_or_create() -> AppConfig {
    match config_path() {
        Some(path) => load_or_create_at(&path),
        None => {
            log::warn!("No config directory available, using defaults");
            AppConfig::default()
        }
    }
}

/// Where the SQLite database lives: the configured path, else a local file
/// in debug builds and the platform data directory in release builds.
pub fn resolve_database_path(config: &AppConfig) -> Result<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    #[cfg(debug_assertions)]
    {
        Ok(PathBuf::from(DATABASE_FILE))
    }

    #[cfg(not(debug_assertions))]
    {
        match project_dirs() {
            Some(dirs) => {
                let data_dir = dirs.data_dir();
                std::fs::create_dir_all(data_dir).with_context(|| {
                    format!("Failed to create data directory at {}", data_dir.display())
                })?;
                Ok(data_dir.join(DATABASE_FILE))
            }
            None => Ok(PathBuf::from(DATABASE_FILE)),
        }
    }
}

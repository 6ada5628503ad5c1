// Application configuration model
// Loaded from config.toml in the platform config directory

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::viewport::ViewportWindow;

pub const DEFAULT_OWNER_ID: &str = "local";
pub const DEFAULT_RASTER_SCALE: u32 = 2;
pub const MAX_RASTER_SCALE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Owner id scoping every stored document.
    pub owner_id: String,
    pub owner_email: String,
    /// Explicit database location; the platform data directory is used when unset.
    pub database_path: Option<PathBuf>,
    pub default_window: ViewportWindow,
    /// Pixel multiplier for PNG exports.
    pub raster_scale: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            owner_id: DEFAULT_OWNER_ID.to_string(),
            owner_email: String::new(),
            database_path: None,
            default_window: ViewportWindow::default(),
            raster_scale: DEFAULT_RASTER_SCALE,
        }
    }
}

impl AppConfig {
    /// Replace out-of-range values with defaults, returning what was fixed.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut fixed = Vec::new();
        if self.owner_id.trim().is_empty() {
            self.owner_id = DEFAULT_OWNER_ID.to_string();
            fixed.push("owner_id".to_string());
        }
        if self.raster_scale == 0 || self.raster_scale > MAX_RASTER_SCALE {
            self.raster_scale = DEFAULT_RASTER_SCALE;
            fixed.push("raster_scale".to_string());
        }
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("owner_email = \"mum@example.com\"").unwrap();
        assert_eq!(config.owner_id, DEFAULT_OWNER_ID);
        assert_eq!(config.owner_email, "mum@example.com");
        assert_eq!(config.raster_scale, DEFAULT_RASTER_SCALE);
        assert_eq!(config.default_window, ViewportWindow::Afternoon);
    }

    #[test]
    fn test_window_from_toml() {
        let config: AppConfig = toml::from_str("default_window = \"Morning\"").unwrap();
        assert_eq!(config.default_window, ViewportWindow::Morning);
    }

    #[test]
    fn test_sanitize() {
        let mut config = AppConfig {
            owner_id: " ".into(),
            raster_scale: 9,
            ..AppConfig::default()
        };
        let fixed = config.sanitize();
        assert_eq!(fixed.len(), 2);
        assert_eq!(config.owner_id, DEFAULT_OWNER_ID);
        assert_eq!(config.raster_scale, DEFAULT_RASTER_SCALE);
        assert!(AppConfig::default().sanitize().is_empty());
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WidgetConfig {
    #[serde(default)]
    pub clock: ClockSettings,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSettings {
    #[serde(default = "default_hour_format")]
    pub hour_format: u8,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_true")]
    pub show_date: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub favorites_path: Option<PathBuf>,
}

// Defaults

fn default_hour_format() -> u8 { 12 }
fn default_date_format() -> String { "%A, %d %B %Y".into() }
fn default_true() -> bool { true }
fn default_period_secs() -> u64 { 60 }

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            hour_format: default_hour_format(),
            date_format: default_date_format(),
            show_date: true,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { period_secs: default_period_secs() }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs_path().join("config.toml")
}

fn dirs_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
            PathBuf::from(home).join(".config")
        });
    base.join("zonewatch")
}

pub fn load_config(path: &std::path::Path) -> Result<WidgetConfig> {
    if !path.exists() {
        log::info!("Config file not found at {}, generating default", path.display());
        let content = generate_default_config();
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match std::fs::write(path, &content) {
            Ok(()) => log::info!("Created default config at {}", path.display()),
            Err(e) => log::warn!("Failed to write default config: {}", e),
        }
        return Ok(WidgetConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: WidgetConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

fn generate_default_config() -> String {
    r#"# zonewatch — world-clock widget daemon
# Configuration file — generated automatically on first run.
# Uncomment and edit values to customise. Defaults are shown.

[clock]
# 12 | 24
hour_format = 12
# Long date format string (chrono strftime)
date_format = "%A, %d %B %Y"
# Show the date line under each city's time
show_date = true

[refresh]
# Seconds between clock refreshes
period_secs = 60

[storage]
# Where the favorite-cities list is persisted
# (default: $XDG_DATA_HOME/zonewatch/favorites.json)
# favorites_path = "/path/to/favorites.json"
"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.clock.hour_format, 12);
        assert_eq!(config.refresh.period_secs, 60);
        assert!(config.clock.show_date);
        assert!(config.storage.favorites_path.is_none());
    }

    #[test]
    fn generated_default_config_parses() {
        let config: WidgetConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.clock.hour_format, 12);
        assert_eq!(config.refresh.period_secs, 60);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: WidgetConfig = toml::from_str("[clock]\nhour_format = 24\n").unwrap();
        assert_eq!(config.clock.hour_format, 24);
        assert_eq!(config.clock.date_format, "%A, %d %B %Y");
        assert_eq!(config.refresh.period_secs, 60);
    }
}

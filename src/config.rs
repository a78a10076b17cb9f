use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::{APP_NAME, DEFAULT_DATA_PATH, POSITRON_TILE_URL};

/// User settings, read from `<config_dir>/led-portfolio/config.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_path: PathBuf,
    /// Seconds between checks for changes to the data file; 0 disables.
    pub watch_interval_secs: u32,
    pub map: MapSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: f64,
    pub min_zoom: u32,
    pub max_zoom: u32,
    pub tile_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            watch_interval_secs: 5,
            map: MapSettings::default(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center_latitude: 20.0,
            center_longitude: 0.0,
            zoom: 2.0,
            min_zoom: 1,
            max_zoom: 10,
            tile_url: POSITRON_TILE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml"))
    }

    /// Load the config at the default location, falling back to defaults
    /// when there is no config directory or no file.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_path, PathBuf::from("projects.csv"));
        assert_eq!(config.map.center_latitude, 20.0);
        assert_eq!(config.map.zoom, 2.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data_path = \"/srv/portfolio/projects.csv\"\n\n[map]\nzoom = 3.5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/portfolio/projects.csv"));
        assert_eq!(config.map.zoom, 3.5);
        assert_eq!(config.map.center_longitude, 0.0);
        assert_eq!(config.map.tile_url, POSITRON_TILE_URL);
        assert_eq!(config.watch_interval_secs, 5);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "watch_interval_secs = \"often\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}

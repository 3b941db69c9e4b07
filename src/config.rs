use crate::localization::LocalizationTable;
use crate::persistence::JsonFileBackend;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(skip)]
    path: Option<PathBuf>,
    /// Where the lookup history is stored.
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    /// Extra or overriding display labels, keyed by location name.
    #[serde(default)]
    pub localization: HashMap<String, String>,
}

impl Config {
    /// Load configuration from the given path, the default config dir (~/.config/lazyweather/) or a local .lazyweather.toml.
    pub fn load(path: Option<&Path>) -> Self {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };
        Self::load_from_path(&config_path)
    }

    fn load_from_path(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(config_path) {
            Ok(content) => Self::parse(&content, config_path),
            Err(e) => {
                warn!("Failed to read config {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    fn parse(content: &str, config_path: &Path) -> Self {
        match toml::from_str::<Config>(content) {
            Ok(mut config) => {
                info!("Loaded config from {:?}", config_path);
                config.path = Some(config_path.to_path_buf());
                config
            }
            Err(e) => {
                warn!("Ignoring invalid config {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Path of the configuration file, if one was loaded.
    pub fn get_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn default_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("lazyweather").join("config.toml");
            if config_path.exists() {
                return config_path;
            }
        }
        PathBuf::from(".lazyweather.toml")
    }

    /// History file to use, `override_path` taking precedence over the config.
    pub fn history_file(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| self.history_file.clone())
            .unwrap_or_else(JsonFileBackend::default_path)
    }

    /// Built-in labels with the configured ones layered on top.
    pub fn build_localization(&self) -> LocalizationTable {
        let mut table = LocalizationTable::builtin();
        table.extend(
            self.localization
                .iter()
                .map(|(name, label)| (name.clone(), label.clone())),
        );
        table
    }
}

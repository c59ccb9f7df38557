//! Application-level configuration loading: where word lists live and how draws are seeded.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "INDOVINATI_CONFIG_PATH";
/// Environment variable that overrides the configured word directory.
const WORDS_DIR_ENV: &str = "WORDS_DIR";
/// Word directory used when nothing else is configured.
const DEFAULT_WORDS_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    words_dir: PathBuf,
    rng_seed: Option<u64>,
}

impl AppConfig {
    /// Build a configuration from explicit values.
    pub fn new(words_dir: impl Into<PathBuf>, rng_seed: Option<u64>) -> Self {
        Self {
            words_dir: words_dir.into(),
            rng_seed,
        }
    }

    /// Load the configuration from disk and apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from(&resolve_config_path());
        if let Some(dir) = env::var_os(WORDS_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.words_dir = PathBuf::from(dir);
            info!(words_dir = %config.words_dir.display(), "word directory overridden from environment");
        }
        config
    }

    /// Load the configuration file at `path`, falling back to built-in defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        words_dir = %app_config.words_dir.display(),
                        seeded = app_config.rng_seed.is_some(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Directory holding one word file per category.
    pub fn words_dir(&self) -> &Path {
        &self.words_dir
    }

    /// Seed for reproducible draws, if configured.
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_DIR, None)
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    words_dir: Option<PathBuf>,
    #[serde(default)]
    rng_seed: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            words_dir: value
                .words_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDS_DIR)),
            rng_seed: value.rng_seed,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("app.json"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.words_dir(), Path::new("./data"));
    }

    #[test]
    fn file_values_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, r#"{ "words_dir": "/srv/parole", "rng_seed": 2020 }"#).unwrap();

        let config = AppConfig::load_from(&path);

        assert_eq!(config.words_dir(), Path::new("/srv/parole"));
        assert_eq!(config.rng_seed(), Some(2020));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, r#"{ "rng_seed": 1 }"#).unwrap();

        let config = AppConfig::load_from(&path);

        assert_eq!(config.words_dir(), Path::new(DEFAULT_WORDS_DIR));
        assert_eq!(config.rng_seed(), Some(1));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }
}

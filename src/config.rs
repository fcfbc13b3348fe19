use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory and file name stem used for config, data and logs
pub const APP_NAME: &str = "msbuild-finder";

/// Environment variable naming an MSBuild (or dotnet CLI) binary
pub const MSBUILD_PATH_ENV: &str = "MSBUILD_PATH";

/// Environment variable naming an XBuild binary
pub const XBUILD_PATH_ENV: &str = "XBUILD_PATH";

/// Default log level for this crate's targets
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Filter applied when a query gives none
    pub default_filter: Option<String>,
    pub log_level: String,
    /// Write logs to a file in addition to stderr
    pub log_to_file: bool,
    /// Log file location, defaults to [`log_path`]
    pub log_file: Option<PathBuf>,
    pub finders: FindersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filter: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_file: false,
            log_file: None,
            finders: FindersConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File to log to, if file logging is enabled
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_to_file
            .then(|| self.log_file.clone().unwrap_or_else(log_path))
    }
}

/// Built-in finder switches
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FindersConfig {
    pub environment: FinderConfig,
    pub path: FinderConfig,
    pub visual_studio: FinderConfig,
    pub dotnet_cli: FinderConfig,
}

/// Individual finder configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinderConfig {
    pub enabled: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Returns the path to the config directory for msbuild-finder.
/// Uses $XDG_CONFIG_HOME/msbuild-finder if XDG_CONFIG_HOME is set,
/// otherwise the platform config directory,
/// or ./msbuild-finder if neither is available.
pub fn config_dir() -> PathBuf {
    app_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::config_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the data directory for msbuild-finder.
/// Uses $XDG_DATA_HOME/msbuild-finder if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/msbuild-finder,
/// or ./msbuild-finder if neither is available.
pub fn data_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir().map(|home| home.join(".local/share")),
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{APP_NAME}.log"))
}

fn app_dir_with_env(xdg_home: Option<String>, fallback: Option<PathBuf>) -> PathBuf {
    let base = xdg_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or(fallback)
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}

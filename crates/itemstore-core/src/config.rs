//! Configuration loading and typed config structures for the Item Store.
//!
//! The configuration lives in `itemstore-config.yaml` in the working
//! directory (or the path named by `ITEMSTORE_CONFIG`). Every field has a
//! default, so the service runs with no file at all. A handful of
//! environment variables override the file after it is parsed.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file read when `ITEMSTORE_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "itemstore-config.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "ITEMSTORE_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong shape.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidOverride {
        /// The environment variable name.
        key: String,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `itemstore-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// API metadata and behaviour.
    #[serde(default)]
    pub api: ApiConfig,

    /// Static file and favicon settings.
    #[serde(default)]
    pub static_files: StaticFilesConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are applied after parsing:
    /// - `ITEMSTORE_HOST` overrides `server.host`
    /// - `ITEMSTORE_PORT` overrides `server.port`
    /// - `ITEMSTORE_STATIC_DIR` overrides `static_files.dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_without_env(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without consulting the
    /// environment.
    pub fn parse_without_env(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load from `path` if the file exists, otherwise start from defaults.
    /// Environment overrides are applied in both cases.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Resolve the config file path from `ITEMSTORE_CONFIG`, falling back
    /// to [`DEFAULT_CONFIG_PATH`].
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ITEMSTORE_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("ITEMSTORE_PORT") {
            self.server.port =
                val.parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidOverride {
                        key: "ITEMSTORE_PORT".to_owned(),
                        value: val.clone(),
                        reason: e.to_string(),
                    })?;
        }
        if let Some(val) = lookup("ITEMSTORE_STATIC_DIR") {
            self.static_files.dir = PathBuf::from(val);
        }
        Ok(())
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for parsing into a socket address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// API metadata and request defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Title shown in the docs page and `OpenAPI` document.
    #[serde(default = "default_title")]
    pub title: String,

    /// API version string.
    #[serde(default = "default_api_version")]
    pub version: String,

    /// Optional long description for the `OpenAPI` document.
    #[serde(default)]
    pub description: Option<String>,

    /// Serve `/docs` and `/openapi.json`, and advertise them from `/`.
    #[serde(default = "default_true")]
    pub docs_enabled: bool,

    /// `limit` used by `GET /items` when the query omits it.
    #[serde(default = "default_list_limit")]
    pub default_list_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_api_version(),
            description: None,
            docs_enabled: true,
            default_list_limit: default_list_limit(),
        }
    }
}

/// Static file serving.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticFilesConfig {
    /// Directory served under `/static` and holding `favicon.ico`.
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// Create an empty `favicon.ico` on first request when it is missing.
    #[serde(default = "default_true")]
    pub create_missing_favicon: bool,
}

impl StaticFilesConfig {
    /// Full path of the favicon file.
    pub fn favicon_path(&self) -> PathBuf {
        self.dir.join("favicon.ico")
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: default_static_dir(),
            create_missing_favicon: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

fn default_title() -> String {
    "Item Store API".to_owned()
}

fn default_api_version() -> String {
    "0.1.0".to_owned()
}

const fn default_true() -> bool {
    true
}

const fn default_list_limit() -> usize {
    10
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_log_level() -> String {
    "info".to_owned()
}

//! Process-wide configuration loaded once at startup.
//!
//! Values come from an optional TOML file plus the environment. The resulting
//! [`EngineConfig`] is immutable and passed explicitly into the catalog client
//! and the ranking engine.
//!
//! ```toml
//! api_key = "..."                 # ELSEVIER_API_KEY wins when set
//! directory = "/srv/journals.json"
//! max_detail_fetches = 5
//! detail_concurrency = 5
//! detail_timeout_secs = 15
//! ```

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{
    CatalogError, DEFAULT_BASE_URL, DEFAULT_SEARCH_COUNT, FetchPolicy, HttpTimeouts,
};
use crate::directory::DirectoryError;

/// Environment variable holding the catalog API credential.
pub const API_KEY_ENV: &str = "ELSEVIER_API_KEY";

/// Directory name under the user config root.
const CONFIG_DIR_NAME: &str = "journal-ranker";

/// Errors raised while loading configuration or building engine collaborators.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unknown keys.
    #[error(
        "cannot parse config file '{path}': {source}\n  Suggestion: Check key names and value types against the documented settings"
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is outside its accepted range.
    #[error("invalid config value for `{key}`: {value}. Expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The curated directory could not be loaded.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The catalog client could not be built.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl fmt::Display, expected: &'static str) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            expected,
        }
    }
}

/// TOML-backed file configuration. Every key is optional.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Catalog API credential.
    pub api_key: Option<String>,
    /// Catalog API base URL.
    pub api_base_url: Option<String>,
    /// Curated directory JSON file.
    pub directory: Option<PathBuf>,
    /// Catalog connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Catalog whole-request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Distinct identifiers enriched per request.
    pub max_detail_fetches: Option<usize>,
    /// Detail fetches in flight at once.
    pub detail_concurrency: Option<usize>,
    /// Per-fetch time budget in seconds.
    pub detail_timeout_secs: Option<u64>,
    /// Documents requested per catalog search.
    pub search_result_count: Option<u32>,
}

impl fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("directory", &self.directory)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .field("max_detail_fetches", &self.max_detail_fetches)
            .field("detail_concurrency", &self.detail_concurrency)
            .field("detail_timeout_secs", &self.detail_timeout_secs)
            .field("search_result_count", &self.search_result_count)
            .finish()
    }
}

impl FileConfig {
    /// Parses TOML text and validates it. `path` is used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`FileConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw, path)?;
        info!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Validates config values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        validate_timeout_secs("detail_timeout_secs", self.detail_timeout_secs)?;

        if let Some(value) = self.max_detail_fetches
            && !(1..=25).contains(&value)
        {
            return Err(ConfigError::invalid("max_detail_fetches", value, "range 1..=25"));
        }
        if let Some(value) = self.detail_concurrency
            && !(1..=25).contains(&value)
        {
            return Err(ConfigError::invalid("detail_concurrency", value, "range 1..=25"));
        }
        if let Some(value) = self.search_result_count
            && !(1..=200).contains(&value)
        {
            return Err(ConfigError::invalid("search_result_count", value, "range 1..=200"));
        }
        if let Some(url) = &self.api_base_url
            && url::Url::parse(url).is_err()
        {
            return Err(ConfigError::invalid("api_base_url", url, "an absolute URL"));
        }
        Ok(())
    }
}

fn validate_timeout_secs(key: &'static str, value: Option<u64>) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        return Err(ConfigError::invalid(key, value, "range 1..=3600"));
    }
    Ok(())
}

/// Resolved engine settings.
#[derive(Clone, PartialEq)]
pub struct EngineConfig {
    /// Catalog API credential; `None` disables the international pool.
    pub api_key: Option<String>,
    /// Catalog API base URL.
    pub api_base_url: String,
    /// Curated directory file; `None` leaves the national pool empty.
    pub directory: Option<PathBuf>,
    /// Catalog client timeouts.
    pub timeouts: HttpTimeouts,
    /// Detail-fetch bounds.
    pub fetch_policy: FetchPolicy,
    /// Documents requested per catalog search.
    pub search_result_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            directory: None,
            timeouts: HttpTimeouts::default(),
            fetch_policy: FetchPolicy::default(),
            search_result_count: DEFAULT_SEARCH_COUNT,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("directory", &self.directory)
            .field("timeouts", &self.timeouts)
            .field("fetch_policy", &self.fetch_policy)
            .field("search_result_count", &self.search_result_count)
            .finish()
    }
}

impl EngineConfig {
    /// Merges file settings with an environment credential.
    ///
    /// A non-blank `env_api_key` takes precedence over the file's `api_key`.
    /// Blank credentials count as absent.
    #[must_use]
    pub fn resolve(file: FileConfig, env_api_key: Option<String>) -> Self {
        let defaults = Self::default();
        let api_key = non_blank(env_api_key).or_else(|| non_blank(file.api_key));
        let fetch_policy = FetchPolicy {
            max_detail_fetches: file
                .max_detail_fetches
                .unwrap_or(defaults.fetch_policy.max_detail_fetches),
            concurrency: file
                .detail_concurrency
                .unwrap_or(defaults.fetch_policy.concurrency),
            detail_timeout: file
                .detail_timeout_secs
                .map_or(defaults.fetch_policy.detail_timeout, Duration::from_secs),
        };
        let timeouts = HttpTimeouts {
            connect_secs: file
                .connect_timeout_secs
                .unwrap_or(defaults.timeouts.connect_secs),
            read_secs: file.read_timeout_secs.unwrap_or(defaults.timeouts.read_secs),
        };

        Self {
            api_key,
            api_base_url: file.api_base_url.unwrap_or(defaults.api_base_url),
            directory: file.directory,
            timeouts,
            fetch_policy,
            search_result_count: file
                .search_result_count
                .unwrap_or(defaults.search_result_count),
        }
    }

    /// Loads the engine configuration from a file (if any) and the environment.
    ///
    /// With `explicit_path` the file must exist. Otherwise the default path is
    /// used when present and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file is unreadable or invalid.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit_path {
            Some(path) => FileConfig::load(path)?,
            None => match resolve_default_config_path() {
                Some(path) if path.exists() => FileConfig::load(&path)?,
                Some(path) => {
                    debug!(path = %path.display(), "No config file at default path");
                    FileConfig::default()
                }
                None => FileConfig::default(),
            },
        };
        Ok(Self::resolve(file, env::var(API_KEY_ENV).ok()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/journal-ranker/config.toml`
/// 2. `$HOME/.config/journal-ranker/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<FileConfig, ConfigError> {
        FileConfig::from_toml_str(raw, Path::new("config.toml"))
    }

    #[test]
    fn test_parse_config_partial_fields() {
        let config = parse(
            r#"
            directory = "/srv/journals.json"
            max_detail_fetches = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("/srv/journals.json")));
        assert_eq!(config.max_detail_fetches, Some(3));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse("concurency = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Suggestion"));
    }

    #[test]
    fn test_parse_config_rejects_wrong_type() {
        assert!(matches!(
            parse("detail_timeout_secs = \"fast\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let err = parse("detail_timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("detail_timeout_secs"));

        let err = parse("detail_concurrency = 100").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "detail_concurrency",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let err = parse("api_base_url = \"api.elsevier.com\"").unwrap_err();
        assert!(err.to_string().contains("api_base_url"));
    }

    #[test]
    fn test_resolve_env_key_wins_over_file() {
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            ..FileConfig::default()
        };
        let config = EngineConfig::resolve(file, Some("from-env".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_resolve_blank_env_key_falls_back_to_file() {
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            ..FileConfig::default()
        };
        let config = EngineConfig::resolve(file, Some("   ".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_resolve_no_credential_is_none() {
        let config = EngineConfig::resolve(FileConfig::default(), None);
        assert!(config.api_key.is_none());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_resolve_applies_fetch_policy_overrides() {
        let file = FileConfig {
            max_detail_fetches: Some(2),
            detail_concurrency: Some(1),
            detail_timeout_secs: Some(3),
            read_timeout_secs: Some(12),
            ..FileConfig::default()
        };
        let config = EngineConfig::resolve(file, None);
        assert_eq!(config.fetch_policy.max_detail_fetches, 2);
        assert_eq!(config.fetch_policy.concurrency, 1);
        assert_eq!(config.fetch_policy.detail_timeout, Duration::from_secs(3));
        assert_eq!(config.timeouts.read_secs, 12);
        assert_eq!(config.timeouts.connect_secs, 10);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = EngineConfig {
            api_key: Some("super-secret".to_string()),
            ..EngineConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            EngineConfig::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "search_result_count = 20\n").unwrap();
        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.search_result_count, Some(20));
    }
}

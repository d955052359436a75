//! Configuration management.
//!
//! Values come from, in increasing precedence: built-in defaults, a TOML
//! file, and `HOOPGRAPH_*` environment variables.
//!
//! ```toml
//! [store]
//! uri = "bolt://localhost:7687"
//! user = "neo4j"
//! password = "secret"
//! database = "neo4j"
//!
//! [loader]
//! data_dir = "data"
//! batch_size = 500
//! active_season = "2019"
//!
//! [features]
//! require_keyword_conjunction = true
//!
//! [logging]
//! format = "pretty"
//! level = "info"
//! file = "/tmp/hoopgraph.log"
//! ```

mod features;

pub use features::FeatureFlags;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "HOOPGRAPH_CONFIG_PATH";

/// Main configuration for hoopgraph.
#[derive(Debug, Default)]
pub struct HoopgraphConfig {
    /// Graph store connection.
    pub store: StoreConfig,
    /// CSV loader settings.
    pub loader: LoaderConfig,
    /// Feature flags.
    pub features: FeatureFlags,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Default-location files that were skipped as unreadable, with the
    /// reason. Loading runs before logging exists, so the caller reports
    /// these once a subscriber is installed.
    pub skipped_files: Vec<(PathBuf, String)>,
}

/// Graph store connection settings.
#[derive(Debug)]
pub struct StoreConfig {
    /// Bolt URI of the server.
    pub uri: String,
    /// User name.
    pub user: String,
    /// Password, never printed.
    pub password: SecretString,
    /// Database that queries run against.
    pub database: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: SecretString::from("neo4j"),
            database: "neo4j".to_string(),
        }
    }
}

/// CSV loader settings.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory holding the four CSV inputs.
    pub data_dir: PathBuf,
    /// Rows shipped per `UNWIND` batch.
    pub batch_size: usize,
    /// `yearActiveTill` value marking the current franchise era.
    pub active_season: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            batch_size: 500,
            active_season: "2019".to_string(),
        }
    }
}

/// Logging settings as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Output format: "pretty" or "json".
    pub format: Option<String>,
    /// Optional log file (appended to).
    pub file: Option<PathBuf>,
    /// Default filter directive when `HOOPGRAPH_LOG` is unset.
    pub level: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Store section.
    pub store: Option<ConfigFileStore>,
    /// Loader section.
    pub loader: Option<ConfigFileLoader>,
    /// Features section.
    pub features: Option<ConfigFileFeatures>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

/// Store section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileStore {
    /// Bolt URI.
    pub uri: Option<String>,
    /// User name.
    pub user: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Database name.
    pub database: Option<String>,
}

/// Loader section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLoader {
    /// CSV directory.
    pub data_dir: Option<String>,
    /// Batch size.
    pub batch_size: Option<usize>,
    /// Active season sentinel.
    pub active_season: Option<String>,
}

/// Features section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileFeatures {
    /// See [`FeatureFlags::require_keyword_conjunction`].
    pub require_keyword_conjunction: Option<bool>,
}

impl HoopgraphConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the configuration for this process.
    ///
    /// An explicit `path` wins, then [`CONFIG_PATH_ENV`], then the default
    /// locations. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed,
    /// or if the resulting values are invalid.
    pub fn resolve(path: Option<&Path>) -> crate::Result<Self> {
        let mut config = if let Some(path) = path {
            Self::load_from_file(path)?
        } else if let Some(env_path) = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            Self::load_from_file(Path::new(&env_path))?
        } else {
            Self::load_default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::operation("read_config_file", format!("{}: {e}", path.display()))
        })?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for [`ConfigFile`].
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| crate::Error::operation("parse_config_file", e))?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the platform config dir, then `~/.config/hoopgraph/`. Returns
    /// defaults if neither holds a readable file.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        Self::load_first(&[
            base_dirs.config_dir().join("hoopgraph").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("hoopgraph")
                .join("config.toml"),
        ])
    }

    /// Loads the first readable file among `candidates`.
    ///
    /// Missing files are passed over silently; unreadable ones are recorded
    /// in [`Self::skipped_files`].
    #[must_use]
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        let mut skipped = Vec::new();
        let mut config = candidates
            .iter()
            .filter(|candidate| candidate.exists())
            .find_map(|candidate| match Self::load_from_file(candidate) {
                Ok(config) => Some(config),
                Err(e) => {
                    skipped.push((candidate.clone(), e.to_string()));
                    None
                },
            })
            .unwrap_or_default();
        config.skipped_files = skipped;
        config
    }

    /// Converts a `ConfigFile` to `HoopgraphConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(store) = file.store {
            if let Some(uri) = store.uri {
                config.store.uri = uri;
            }
            if let Some(user) = store.user {
                config.store.user = user;
            }
            if let Some(password) = store.password {
                config.store.password = SecretString::from(password);
            }
            if let Some(database) = store.database {
                config.store.database = database;
            }
        }
        if let Some(loader) = file.loader {
            if let Some(dir) = loader.data_dir {
                config.loader.data_dir = PathBuf::from(dir);
            }
            if let Some(size) = loader.batch_size {
                config.loader.batch_size = size;
            }
            if let Some(season) = loader.active_season {
                config.loader.active_season = season;
            }
        }
        if let Some(features) = file.features {
            if let Some(v) = features.require_keyword_conjunction {
                config.features.require_keyword_conjunction = v;
            }
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies `HOOPGRAPH_*` overrides using `lookup` to read variables.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(uri) = get("HOOPGRAPH_NEO4J_URI") {
            self.store.uri = uri;
        }
        if let Some(user) = get("HOOPGRAPH_NEO4J_USER") {
            self.store.user = user;
        }
        if let Some(password) = get("HOOPGRAPH_NEO4J_PASSWORD") {
            self.store.password = SecretString::from(password);
        }
        if let Some(database) = get("HOOPGRAPH_NEO4J_DATABASE") {
            self.store.database = database;
        }
        if let Some(dir) = get("HOOPGRAPH_DATA_DIR") {
            self.loader.data_dir = PathBuf::from(dir);
        }
        if let Some(format) = get("HOOPGRAPH_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = get("HOOPGRAPH_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
    }

    /// Checks values that would otherwise fail later in confusing ways.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] for a zero batch size or an
    /// empty database name.
    pub fn validate(&self) -> crate::Result<()> {
        if self.loader.batch_size == 0 {
            return Err(crate::Error::InvalidInput(
                "loader.batch_size must be at least 1".to_string(),
            ));
        }
        if self.store.database.trim().is_empty() {
            return Err(crate::Error::InvalidInput(
                "store.database must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Key/value lines describing the effective configuration.
    ///
    /// The password is reported only as set or unset.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let password = if self.store.password.expose_secret().is_empty() {
            "(unset)"
        } else {
            "********"
        };
        vec![
            ("store.uri", self.store.uri.clone()),
            ("store.user", self.store.user.clone()),
            ("store.password", password.to_string()),
            ("store.database", self.store.database.clone()),
            ("loader.data_dir", self.loader.data_dir.display().to_string()),
            ("loader.batch_size", self.loader.batch_size.to_string()),
            ("loader.active_season", self.loader.active_season.clone()),
            (
                "features.require_keyword_conjunction",
                self.features.require_keyword_conjunction.to_string(),
            ),
            (
                "logging.format",
                self.logging
                    .format
                    .clone()
                    .unwrap_or_else(|| "pretty".to_string()),
            ),
            (
                "logging.level",
                self.logging
                    .level
                    .clone()
                    .unwrap_or_else(|| "info".to_string()),
            ),
            (
                "logging.file",
                self.logging
                    .file
                    .as_ref()
                    .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = HoopgraphConfig::new();
        assert_eq!(config.store.uri, "bolt://localhost:7687");
        assert_eq!(config.store.database, "neo4j");
        assert_eq!(config.loader.batch_size, 500);
        assert_eq!(config.loader.active_season, "2019");
        assert!(config.features.require_keyword_conjunction);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = HoopgraphConfig::from_toml(
            r#"
            [store]
            database = "basketball"
            password = "retrieval"

            [features]
            require_keyword_conjunction = false
            "#,
        )
        .unwrap();

        assert_eq!(config.store.database, "basketball");
        assert_eq!(config.store.password.expose_secret(), "retrieval");
        assert_eq!(config.store.user, "neo4j");
        assert!(!config.features.require_keyword_conjunction);
        assert_eq!(config.loader.batch_size, 500);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let result = HoopgraphConfig::from_toml("[store\nuri = ");
        assert!(matches!(
            result,
            Err(crate::Error::OperationFailed { ref operation, .. }) if operation == "parse_config_file"
        ));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("HOOPGRAPH_NEO4J_URI", "bolt://graph:7687"),
            ("HOOPGRAPH_NEO4J_PASSWORD", "s3cret"),
            ("HOOPGRAPH_DATA_DIR", "/srv/csv"),
            ("HOOPGRAPH_NEO4J_USER", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = HoopgraphConfig::new();
        config.apply_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.store.uri, "bolt://graph:7687");
        assert_eq!(config.store.password.expose_secret(), "s3cret");
        assert_eq!(config.loader.data_dir, PathBuf::from("/srv/csv"));
        // Blank values are ignored.
        assert_eq!(config.store.user, "neo4j");
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut config = HoopgraphConfig::new();
        config.loader.batch_size = 0;
        assert!(matches!(
            config.validate(),
            Err(crate::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_describe_redacts_password() {
        let config = HoopgraphConfig::new();
        let lines = config.describe();
        let password = lines
            .iter()
            .find(|(key, _)| *key == "store.password")
            .map(|(_, value)| value.as_str());
        assert_eq!(password, Some("********"));

        let mut config = HoopgraphConfig::new();
        config.store.password = SecretString::from("");
        let lines = config.describe();
        assert!(lines.contains(&("store.password", "(unset)".to_string())));
    }

    #[test]
    fn test_from_toml_logging_level() {
        let config = HoopgraphConfig::from_toml(
            r#"
            [logging]
            level = "hoopgraph=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("hoopgraph=debug"));
        assert!(
            config
                .describe()
                .contains(&("logging.level", "hoopgraph=debug".to_string()))
        );
    }

    #[test]
    fn test_load_first_records_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let missing = dir.path().join("missing.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[store\nuri = ").unwrap();
        std::fs::write(&good, "[store]\ndatabase = \"basketball\"\n").unwrap();

        let config = HoopgraphConfig::load_first(&[broken.clone(), missing, good]);

        assert_eq!(config.store.database, "basketball");
        assert_eq!(config.skipped_files.len(), 1);
        assert_eq!(config.skipped_files[0].0, broken);
        assert!(config.skipped_files[0].1.contains("parse_config_file"));
    }
}

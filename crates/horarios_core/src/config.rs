//! Deploy-time configuration.
//!
//! # Responsibility
//! - Resolve database path, logging and validation strictness from
//!   environment variables.
//!
//! # Invariants
//! - Values are trimmed; an empty value counts as unset.
//! - Resolution never touches the filesystem.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use crate::model::validation::ValidationRules;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "HORARIOS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "HORARIOS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "HORARIOS_LOG_DIR";
pub const ENV_STRICT_GROUPS: &str = "HORARIOS_STRICT_GROUPS";

const DEFAULT_DB_FILE_NAME: &str = "horarios.sqlite3";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => write!(f, "invalid {name}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
    /// Require schedule group names to exist in the catalog.
    pub strict_groups: bool,
}

impl AppConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to its
    /// raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH).map_or_else(
            || std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            PathBuf::from,
        );

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(|message| ConfigError::InvalidValue {
                name: ENV_LOG_LEVEL,
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = read(ENV_LOG_DIR)
            .map(|value| {
                normalize_log_dir(&value).map_err(|message| ConfigError::InvalidValue {
                    name: ENV_LOG_DIR,
                    message,
                })
            })
            .transpose()?;

        let strict_groups = match read(ENV_STRICT_GROUPS) {
            Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                name: ENV_STRICT_GROUPS,
                message: format!("expected 1|0|true|false|yes|no|on|off, got `{value}`"),
            })?,
            None => false,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            strict_groups,
        })
    }

    /// Validation rules implied by this configuration.
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            require_catalog_group: self.strict_groups,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = resolve(&[]).unwrap();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        );
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
        assert!(!config.strict_groups);
        assert!(!config.validation_rules().require_catalog_group);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = resolve(&[(ENV_DB_PATH, "   "), (ENV_LOG_LEVEL, "")]).unwrap();
        assert_eq!(config.log_level, default_log_level());
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
    }

    #[test]
    fn explicit_values_are_normalized() {
        let config = resolve(&[
            (ENV_DB_PATH, " /srv/horarios/data.sqlite3 "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "/var/log/horarios"),
            (ENV_STRICT_GROUPS, "Yes"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/srv/horarios/data.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/horarios")));
        assert!(config.validation_rules().require_catalog_group);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = resolve(&[(ENV_LOG_LEVEL, "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == ENV_LOG_LEVEL));

        let err = resolve(&[(ENV_LOG_DIR, "relative/logs")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid HORARIOS_LOG_DIR"));

        let err = resolve(&[(ENV_STRICT_GROUPS, "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == ENV_STRICT_GROUPS));
    }
}

//! YAML Configuration File Support for eSupport
//!
//! Loads the routing and logging settings from a single YAML file, then lets
//! `ESUPPORT_*` environment variables override individual values.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # eSupport intake configuration
//! version: "1.0"
//! name: "production"
//!
//! routing:
//!   primary_route: "TicketingAPI"   # or "Email"
//!   email_fallback_enabled: true
//!   support_email_address: "support@example.org"
//!
//! logging:
//!   level: "info"
//!   json: true
//! ```
//!
//! ## Environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ESUPPORT_PRIMARY_ROUTE` | `routing.primary_route` |
//! | `ESUPPORT_EMAIL_FALLBACK` | `routing.email_fallback_enabled` |
//! | `ESUPPORT_SUPPORT_EMAIL` | `routing.support_email_address` |
//! | `ESUPPORT_LOG_LEVEL` | `logging.level` |
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use intake::{ConfigError, PrimaryRoute, RoutingConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by all override variables.
pub const ENV_PREFIX: &str = "ESUPPORT_";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid routing configuration: {0}")]
    Routing(#[from] ConfigError),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EsupportConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub routing: RoutingYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl EsupportConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: EsupportConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// File (or defaults when `path` is `None`) plus process environment
    /// overrides, validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.with_os_overrides(std::env::vars_os())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `ESUPPORT_*` pairs from `vars`; unrelated keys are ignored.
    pub fn with_overrides<I, K, V>(mut self, vars: I) -> Result<Self, ConfigLoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();
            match name {
                "PRIMARY_ROUTE" => self.routing.primary_route = value.parse()?,
                "EMAIL_FALLBACK" => {
                    self.routing.email_fallback_enabled = parse_flag(value).ok_or_else(|| {
                        ConfigLoadError::Validation(format!(
                            "ESUPPORT_EMAIL_FALLBACK must be a boolean, got {value:?}"
                        ))
                    })?;
                }
                "SUPPORT_EMAIL" => self.routing.support_email_address = value.trim().to_string(),
                "LOG_LEVEL" => self.logging.level = value.trim().to_string(),
                _ => {}
            }
        }
        Ok(self)
    }

    /// [`with_overrides`](Self::with_overrides) over raw OS strings.
    ///
    /// Non-UTF-8 keys cannot be `ESUPPORT_*` names and are skipped; a
    /// non-UTF-8 value under an `ESUPPORT_*` key is a validation error.
    pub fn with_os_overrides<I>(self, vars: I) -> Result<Self, ConfigLoadError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut pairs = Vec::new();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            if !key.starts_with(ENV_PREFIX) {
                continue;
            }
            let value = value.into_string().map_err(|_| {
                ConfigLoadError::Validation(format!("{key} is not valid UTF-8"))
            })?;
            pairs.push((key, value));
        }
        self.with_overrides(pairs)
    }

    /// The immutable routing value handed to every intake call.
    pub fn routing_config(&self) -> RoutingConfig {
        RoutingConfig {
            primary_route: self.routing.primary_route,
            email_fallback_enabled: self.routing.email_fallback_enabled,
            support_email_address: self.routing.support_email_address.clone(),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.routing_config().validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Default for EsupportConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            routing: RoutingYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Routing section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingYamlConfig {
    #[serde(default = "default_primary_route")]
    pub primary_route: PrimaryRoute,

    #[serde(default = "true_value")]
    pub email_fallback_enabled: bool,

    #[serde(default = "default_support_email")]
    pub support_email_address: String,
}

impl Default for RoutingYamlConfig {
    fn default() -> Self {
        let routing = RoutingConfig::default();
        Self {
            primary_route: routing.primary_route,
            email_fallback_enabled: routing.email_fallback_enabled,
            support_email_address: routing.support_email_address,
        }
    }
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    /// `EnvFilter` directive, e.g. `info` or `intake=debug,warn`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_primary_route() -> PrimaryRoute {
    RoutingConfig::default().primary_route
}
fn default_support_email() -> String {
    RoutingConfig::default().support_email_address
}
fn default_log_level() -> String {
    "info".to_string()
}
fn true_value() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
routing:
  primary_route: "Email"
  email_fallback_enabled: false
  support_email_address: "help@example.org"
logging:
  level: "debug"
  json: true
"#;

        let config = EsupportConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.routing.primary_route, PrimaryRoute::Email);
        assert!(!config.routing.email_fallback_enabled);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);

        let routing = config.routing_config();
        assert_eq!(routing.support_email_address, "help@example.org");
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config = EsupportConfig::from_yaml("version: \"1\"\n").unwrap();
        assert_eq!(config.routing, RoutingYamlConfig::default());
        assert_eq!(config.logging, LoggingYamlConfig::default());
        assert_eq!(config.routing_config(), RoutingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1.0"
routing:
  primary_route: "TicketingAPI"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = EsupportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.routing.primary_route, PrimaryRoute::TicketingApi);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = EsupportConfig::from_file("/definitely/not/here/esupport.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let result = EsupportConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_bad_support_email_rejected() {
        let yaml = r#"
version: "1.0"
routing:
  support_email_address: "not-an-address"
"#;
        let result = EsupportConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Routing(_))));
    }

    #[test]
    fn test_unknown_route_is_a_parse_error() {
        let yaml = r#"
version: "1.0"
routing:
  primary_route: "Carrier pigeon"
"#;
        assert!(matches!(
            EsupportConfig::from_yaml(yaml),
            Err(ConfigLoadError::YamlParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = EsupportConfig::default()
            .with_overrides([
                ("ESUPPORT_PRIMARY_ROUTE", "email"),
                ("ESUPPORT_EMAIL_FALLBACK", "off"),
                ("ESUPPORT_SUPPORT_EMAIL", " desk@example.org "),
                ("ESUPPORT_LOG_LEVEL", "warn"),
                ("PATH", "/usr/bin"),
            ])
            .unwrap();

        assert_eq!(config.routing.primary_route, PrimaryRoute::Email);
        assert!(!config.routing.email_fallback_enabled);
        assert_eq!(config.routing.support_email_address, "desk@example.org");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_os_overrides_apply_utf8_pairs() {
        let config = EsupportConfig::default()
            .with_os_overrides([
                (OsString::from("ESUPPORT_PRIMARY_ROUTE"), OsString::from("Email")),
                (OsString::from("HOME"), OsString::from("/root")),
            ])
            .unwrap();
        assert_eq!(config.routing.primary_route, PrimaryRoute::Email);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_environment() {
        use std::os::unix::ffi::OsStringExt;

        let garbage = || OsString::from_vec(vec![0xff, 0xfe]);

        // Unrelated keys and values are ignored whatever their encoding.
        let config = EsupportConfig::default()
            .with_os_overrides([
                (OsString::from("LANG_BROKEN"), garbage()),
                (garbage(), OsString::from("x")),
                (OsString::from("ESUPPORT_LOG_LEVEL"), OsString::from("debug")),
            ])
            .unwrap();
        assert_eq!(config.logging.level, "debug");

        let result = EsupportConfig::default()
            .with_os_overrides([(OsString::from("ESUPPORT_SUPPORT_EMAIL"), garbage())]);
        assert!(
            matches!(result, Err(ConfigLoadError::Validation(msg)) if msg.contains("ESUPPORT_SUPPORT_EMAIL"))
        );
    }

    #[test]
    fn test_bad_env_overrides() {
        let result = EsupportConfig::default().with_overrides([("ESUPPORT_EMAIL_FALLBACK", "maybe")]);
        assert!(matches!(result, Err(ConfigLoadError::Validation(_))));

        let result = EsupportConfig::default().with_overrides([("ESUPPORT_PRIMARY_ROUTE", "fax")]);
        assert!(matches!(result, Err(ConfigLoadError::Routing(ConfigError::UnknownRoute(_)))));
    }
}

//! TOML-based application configuration.

use std::fmt;
use std::fs;
use std::net::IpAddr;
use std::path::Path;

use serde::Deserialize;

/// Top-level application configuration parsed from TOML.
///
/// All fields have defaults matching a local deployment. Load from TOML with
/// [`AppConfig::from_toml_file`] or start from [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server bind parameters.
    pub server: ServerConfig,
    /// Billing period and currency display parameters.
    pub billing: BillingConfig,
}

/// HTTP server bind parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// IP address to bind to.
    pub bind: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Billing period and currency display parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillingConfig {
    /// Number of hours in the cumulative table (must be >= 1).
    ///
    /// The web form always bills a full day; this is configuration rather
    /// than a literal so tests can use smaller tables.
    pub hours: usize,
    /// Whole currency unit label (e.g. `"RM"`).
    pub currency_label: String,
    /// Currency subunit label for the tariff rate (e.g. `"sen"`).
    pub subunit_label: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            hours: 24,
            currency_label: "RM".to_string(),
            subunit_label: "sen".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"billing.hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AppConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.bind.parse::<IpAddr>().is_err() {
            errors.push(ConfigError {
                field: "server.bind".into(),
                message: format!("\"{}\" is not a valid IP address", self.server.bind),
            });
        }

        if self.billing.hours == 0 {
            errors.push(ConfigError {
                field: "billing.hours".into(),
                message: "must be >= 1".into(),
            });
        }
        if self.billing.currency_label.is_empty() {
            errors.push(ConfigError {
                field: "billing.currency_label".into(),
                message: "must not be empty".into(),
            });
        }
        if self.billing.subunit_label.is_empty() {
            errors.push(ConfigError {
                field: "billing.subunit_label".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}

//! TOML settings for the binday binaries.
//!
//! Every section is optional; missing keys fall back to the East Ayrshire
//! defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use crate::guard::DeviceAddress;
use crate::model::{CouncilId, Councils};
use crate::resolver::ResolverOptions;
use crate::tracing::{TracingConfig, TracingOutputFormat};

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Settings`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is syntactically valid but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Council whose plugin answers queries.
    pub council: String,
    /// Schedule source.
    pub source: SourceSettings,
    /// Household address standing in for the device address.
    pub address: AddressSettings,
    /// Address guard settings.
    pub guard: GuardSettings,
    /// Resolver policies.
    pub resolver: ResolverOptions,
    /// Log output.
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            council: Councils::EastAyrshire.to_string(),
            source: SourceSettings::default(),
            address: AddressSettings::default(),
            guard: GuardSettings::default(),
            resolver: ResolverOptions::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Payload format served by the schedule source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// JSON REST endpoint keyed by date.
    #[default]
    Json,
    /// iCalendar feed.
    Ical,
}

/// Where and how schedules are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Payload format.
    pub kind: SourceKind,
    /// Scheme and host of the council website.
    pub base_url: String,
    /// Path of the iCalendar feed below `base_url`.
    pub ical_feed: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Json,
            base_url: "https://www.east-ayrshire.gov.uk".to_owned(),
            ical_feed: "recycling/127020124.ics".to_owned(),
            timeout_secs: 10,
        }
    }
}

/// Household address and whether the user agreed to its use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressSettings {
    /// First address line, e.g. “12 Main Street”.
    pub line1: Option<String>,
    /// Postcode.
    pub postcode: Option<String>,
    /// Address use has been granted.
    pub consent: bool,
}

impl AddressSettings {
    /// Address in the shape the guard expects, if any part is set.
    #[must_use]
    pub fn device_address(&self) -> Option<DeviceAddress> {
        if self.line1.is_none() && self.postcode.is_none() {
            return None;
        }
        Some(DeviceAddress {
            address_line1: self.line1.clone(),
            postal_code: self.postcode.clone(),
        })
    }
}

/// Address guard settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSettings {
    /// Served postcodes; empty accepts any.
    pub allowed_postcodes: Vec<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Output format.
    pub format: TracingOutputFormat,
    /// Filter directive overriding `level`.
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: TracingOutputFormat::Compact,
            filter: None,
        }
    }
}

impl LoggingSettings {
    /// Translate into a [`TracingConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unknown level name.
    pub fn tracing_config(&self) -> Result<TracingConfig, ConfigError> {
        let level = Level::from_str(self.level.trim())
            .map_err(|_err| ConfigError::Invalid(format!("unknown log level {:?}", self.level)))?;
        let config = TracingConfig::default()
            .with_level(level)
            .with_format(self.format);
        Ok(match &self.filter {
            Some(filter) => config.with_env_filter(filter.clone()),
            None => config,
        })
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the text cannot be parsed or validated.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Council identifier to route queries to.
    #[must_use]
    pub fn council_id(&self) -> CouncilId {
        CouncilId(self.council.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.source.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "source.base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "source.timeout_secs must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

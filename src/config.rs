//! Settings loaded from a TOML file.
//!
//! ```toml
//! time_zone = 7.0
//!
//! [[holidays]]
//! id = "tet"
//! title = "Tết Nguyên Đán"
//! calendar = "lunar"
//! month = 1
//! day = 1
//! ```
//!
//! Every field is optional: a missing `time_zone` means UTC+7 and a missing
//! `holidays` table means [`default_holidays`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConversionError;
use crate::holidays::{Holiday, default_holidays};
use crate::time_scales::TimeZone;

/// Error loading [`Settings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {source}")]
    Invalid {
        field: String,
        #[source]
        source: ConversionError,
    },
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Time zone the calendar is reckoned in.
    #[serde(default)]
    pub time_zone: TimeZone,

    /// Holidays to track.
    #[serde(default = "default_holidays")]
    pub holidays: Vec<Holiday>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_zone: TimeZone::default(),
            holidays: default_holidays(),
        }
    }
}

impl Settings {
    /// Loads and validates settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading settings");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks every holiday for an impossible month or day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, holiday) in self.holidays.iter().enumerate() {
            holiday.validate().map_err(|source| ConfigError::Invalid {
                field: format!("holidays[{i}] ({})", holiday.id),
                source,
            })?;
        }
        Ok(())
    }
}

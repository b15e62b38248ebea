//! Layout configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{MalleabiteError, MalleabiteResult};

/// Configuration at ~/.config/malleabite/config.toml
///
/// The layout algorithm has no tuning knobs; the only setting is the zone
/// that description times and default slots are anchored in. When it is
/// unset the caller picks the zone (the CLI uses the system zone).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// IANA zone name, e.g. "Europe/Berlin". Unset means the caller decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl LayoutConfig {
    pub fn config_path() -> MalleabiteResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MalleabiteError::Config("Could not determine config directory".into()))?
            .join("malleabite");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location. A missing file gives the defaults.
    pub fn load() -> MalleabiteResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> MalleabiteResult<Self> {
        if !path.exists() {
            return Ok(LayoutConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MalleabiteError::Config(format!("Could not parse {}: {e}", path.display()))
        })
    }

    /// The configured zone, if any, validated.
    pub fn timezone(&self) -> MalleabiteResult<Option<Tz>> {
        self.timezone.as_deref().map(parse_timezone).transpose()
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MalleabiteResult<()> {
        let contents = "\
# malleabite layout configuration

# Time zone that description times (\"14:00 - 15:30\") and the
# default 09:00 slot are anchored in:
# timezone = \"Europe/Berlin\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MalleabiteError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MalleabiteError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

pub fn parse_timezone(name: &str) -> MalleabiteResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| MalleabiteError::InvalidTimezone(name.to_string()))
}

use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alphabet::Tier;
use crate::consts::{DEFAULT_ASCII_BASE, MAX_ASCII_BASE};

fn default_ascii_base() -> u32 {
    DEFAULT_ASCII_BASE
}

/// Encoding options, usually read from a small TOML file:
///
/// ```toml
/// tier = "3bit"
/// ascii_base = 33
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Forced tier. `None` lets the dispatcher pick the minimal one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    /// ASCII offset of quality strings.
    #[serde(default = "default_ascii_base")]
    pub ascii_base: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            tier: None,
            ascii_base: DEFAULT_ASCII_BASE,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ASCII base {0} is out of range, it must be at most {MAX_ASCII_BASE}")]
    InvalidAsciiBase(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl CodecConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ascii_base > MAX_ASCII_BASE {
            return Err(ConfigError::InvalidAsciiBase(self.ascii_base));
        }
        Ok(())
    }
}

impl FromStr for CodecConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: CodecConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<&Path> for CodecConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        toml_str.parse()
    }
}

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{vendor} devices are configured but no API key is set (config file or {env_var})")]
    MissingApiKey {
        vendor: &'static str,
        env_var: &'static str,
    },
    #[error("{0} device list contains an empty device ID")]
    EmptyDeviceId(&'static str),
    #[error("{0} request delay must be a non-negative number of seconds within range")]
    InvalidDelay(&'static str),
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct VendorConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub device_ids: Vec<String>,
    pub base_url: Option<String>,
    pub request_delay_secs: Option<f64>,
}

impl VendorConfig {
    fn validate(&self, vendor: &'static str, env_var: &'static str) -> Result<(), ConfigError> {
        if self.device_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::EmptyDeviceId(vendor));
        }
        if !self.device_ids.is_empty()
            && self.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err(ConfigError::MissingApiKey { vendor, env_var });
        }
        if let Some(delay) = self.request_delay_secs {
            request_delay(delay, vendor)?;
        }
        Ok(())
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

// Rejects NaN, negative and out-of-range values
fn request_delay(secs: f64, vendor: &'static str) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidDelay(vendor))
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub awair: VendorConfig,
    #[serde(default)]
    pub kaiterra: VendorConfig,
    pub output_file: Option<PathBuf>,
}

impl Config {
    pub fn awair_base_url(&self) -> &str {
        self.awair
            .base_url
            .as_deref()
            .unwrap_or(defaults::AWAIR_BASE_URL)
    }

    pub fn kaiterra_base_url(&self) -> &str {
        self.kaiterra
            .base_url
            .as_deref()
            .unwrap_or(defaults::KAITERRA_BASE_URL)
    }

    pub fn awair_request_delay(&self) -> Result<Duration, ConfigError> {
        self.awair
            .request_delay_secs
            .map_or(Ok(defaults::AWAIR_REQUEST_DELAY), |secs| {
                request_delay(secs, "Awair")
            })
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_FILE))
    }

    /// API keys from the environment take precedence over the config file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var(envvars::AWAIR_API_KEY) {
            self.awair.api_key = Some(key);
        }
        if let Ok(key) = env::var(envvars::KAITERRA_API_KEY) {
            self.kaiterra.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.awair.validate("Awair", envvars::AWAIR_API_KEY)?;
        self.kaiterra.validate("Kaiterra", envvars::KAITERRA_API_KEY)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}

pub fn from_str(config_raw: &str) -> Result<Config, ConfigError> {
    serde_json::from_str::<Config>(config_raw).map_err(Into::into)
}

/// Read the config file, apply environment overrides and validate
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = from_str(&raw)?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

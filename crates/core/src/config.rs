//! Engine configuration.
//!
//! A small TOML file plus `SALONBOOK_*` environment overrides. The policy
//! prose (hours, pricing) is opaque to the engine: it exists so the
//! conversational layer can read it back to clients, and no scheduling logic
//! ever interprets it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "salonbook.toml";

const ENV_CONFIG_PATH: &str = "SALONBOOK_CONFIG";
const ENV_SALON_NAME: &str = "SALONBOOK_SALON_NAME";
const ENV_SEED_DEMO_DATA: &str = "SALONBOOK_SEED_DEMO_DATA";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalonConfig {
    pub salon_name: String,
    pub policy: PolicyConfig,
    /// Start the store from the demo dataset instead of empty.
    pub seed_demo_data: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyConfig {
    pub hours_text: String,
    pub pricing_text: String,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            salon_name: "Polished Nail Studio".to_owned(),
            policy: PolicyConfig {
                hours_text: "Open daily, appointments 9am to 5pm.".to_owned(),
                pricing_text: "Service pricing is quoted at booking.".to_owned(),
            },
            seed_demo_data: false,
        }
    }
}

/// Values that take precedence over both the file and the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub salon_name: Option<String>,
    pub seed_demo_data: Option<bool>,
}

impl ConfigOverrides {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let seed_demo_data = match env::var(ENV_SEED_DEMO_DATA) {
            Ok(raw) => Some(parse_bool(ENV_SEED_DEMO_DATA, &raw)?),
            Err(_) => None,
        };
        Ok(Self { salon_name: env::var(ENV_SALON_NAME).ok(), seed_demo_data })
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    /// When set, a missing file is an error instead of falling back to defaults.
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
struct SalonConfigFile {
    salon_name: Option<String>,
    seed_demo_data: Option<bool>,
    policy: Option<PolicyFileSection>,
}

#[derive(Debug, Default, Deserialize)]
struct PolicyFileSection {
    hours_text: Option<String>,
    pricing_text: Option<String>,
}

impl SalonConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let path = options
            .config_path
            .or_else(|| env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let file = match read_config_file(&path) {
            Ok(file) => file,
            Err(ConfigError::MissingConfigFile(path)) if !options.require_file => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                SalonConfigFile::default()
            }
            Err(error) => return Err(error),
        };

        let defaults = SalonConfig::default();
        let policy = file.policy.unwrap_or_default();
        let config = SalonConfig {
            salon_name: options
                .overrides
                .salon_name
                .or(file.salon_name)
                .unwrap_or(defaults.salon_name),
            policy: PolicyConfig {
                hours_text: policy.hours_text.unwrap_or(defaults.policy.hours_text),
                pricing_text: policy.pricing_text.unwrap_or(defaults.policy.pricing_text),
            },
            seed_demo_data: options
                .overrides
                .seed_demo_data
                .or(file.seed_demo_data)
                .unwrap_or(defaults.seed_demo_data),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.salon_name.trim().is_empty() {
            return Err(ConfigError::Validation("salon_name must not be empty".to_owned()));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<SalonConfigFile, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
    toml::from_str(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnvOverride { key: key.to_owned(), value: raw.to_owned() }),
    }
}

use std::fs;
use chrono_tz::Tz;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

#[derive(Deserialize)]
pub struct Sources {
    pub location: String,
    #[serde(default = "default_detailed")]
    pub detailed: String,
    #[serde(default = "default_daily")]
    pub daily: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Api {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub sources: Sources,
    pub api: Api,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and validates configuration items
///
/// # Arguments
///
/// * 'toml' - the configuration document
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.sources.location.trim().is_empty() {
        return Err(ConfigError::from("sources.location must not be empty"));
    }
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::from("api.base_url must not be empty"));
    }

    Ok(config)
}

fn default_detailed() -> String { "forecast_detailed.json".to_string() }

fn default_daily() -> String { "forecast.json".to_string() }

fn default_timeout() -> u64 { 30 }

fn default_timezone() -> Tz { chrono_tz::America::Los_Angeles }

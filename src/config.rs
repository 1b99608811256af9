use crate::constants::{
    API_KEY_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_RATE_LIMIT_DELAY_MS, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{DraftError, DraftResult};
use crate::settings::Settings;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub rate_limit_delay_ms: u64,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            rate_limit_delay_ms: DEFAULT_RATE_LIMIT_DELAY_MS,
            log_level: "info".to_string(),
            log_dir: None,
            settings: Settings::default(),
        }
    }
}

impl Config {
    /// Where log files go when `log_dir` isn't set.
    pub fn effective_log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(env::temp_dir)
                .join("draftwise")
                .join("logs")
        })
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads (or creates) the config file and installs it as the process-wide
/// config. `GROQ_API_KEY` from the environment wins over the file.
pub fn initialize_config() -> DraftResult<Config> {
    let config_path = get_config_path()?;

    let mut config = if config_path.exists() {
        load_config_from(&config_path)?
    } else {
        let config = Config::default();
        save_config_to(&config_path, &config)?;
        config
    };

    if let Ok(key) = env::var(API_KEY_ENV_VAR) {
        if !key.trim().is_empty() {
            config.api_key = key.trim().to_string();
        }
    }

    set_config(config.clone())?;
    Ok(config)
}

pub fn get_config_path() -> DraftResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| DraftError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("draftwise").join("config.json"))
}

pub fn load_config_from(path: &Path) -> DraftResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| DraftError::config_error(format!("Failed to read config file: {}", e)))?;

    let mut config: Config = serde_json::from_str(&config_str)
        .map_err(|e| DraftError::config_error(format!("Failed to parse config: {}", e)))?;

    config.settings = config.settings.clamped();
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> DraftResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DraftError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| DraftError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| DraftError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(())
}

pub fn validate_config(config: &Config) -> DraftResult<()> {
    if config.base_url.trim().is_empty() {
        return Err(DraftError::config_error("base_url is required"));
    }

    if config.request_timeout_secs == 0 {
        return Err(DraftError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        return Err(DraftError::config_error(format!(
            "Unknown log_level '{}'",
            config.log_level
        )));
    }

    if !config.settings.is_in_range() {
        return Err(DraftError::config_error("settings are out of range"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn set_config(config: Config) -> DraftResult<()> {
    let mut guard = CONFIG
        .write()
        .map_err(|_| DraftError::config_error("config lock poisoned"))?;
    *guard = config;
    Ok(())
}
